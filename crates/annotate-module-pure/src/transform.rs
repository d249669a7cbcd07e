//! Runs [annotate_module_pure] over a single source file, the way a host
//! pipeline would: parse, `resolver`, annotate, print.

use anyhow::{Context, Result, anyhow, bail};
use swc_core::{
    common::{FileName, GLOBALS, Mark, SourceMap, comments::SingleThreadedComments, sync::Lrc},
    ecma::{
        ast::EsVersion,
        codegen::{self, Emitter, text_writer::JsWriter},
        parser::{EsSyntax, Syntax, TsSyntax, parse_file_as_program},
        transforms::base::resolver,
        visit::VisitMutWith,
    },
};

use crate::transforms::annotate_module_pure::{Config, annotate_module_pure};

#[derive(Clone, Debug, Default)]
pub struct TransformOptions {
    /// Parse the source as TypeScript instead of JavaScript.
    pub typescript: bool,
    /// Accept JSX (TSX when combined with `typescript`).
    pub jsx: bool,
    /// Print without formatting whitespace. Comments, and so the markers,
    /// are kept.
    pub minify: bool,
}

impl TransformOptions {
    fn syntax(&self) -> Syntax {
        if self.typescript {
            Syntax::Typescript(TsSyntax {
                tsx: self.jsx,
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx: self.jsx,
                ..Default::default()
            })
        }
    }
}

pub fn annotate_source(source: &str, config: &Config, options: &TransformOptions) -> Result<String> {
    GLOBALS.set(&Default::default(), || {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(Lrc::new(FileName::Anon), source.to_string());
        let comments = SingleThreadedComments::default();

        let mut errors = vec![];
        let span = tracing::trace_span!("swc_parse").entered();
        let program = parse_file_as_program(
            &fm,
            options.syntax(),
            EsVersion::latest(),
            Some(&comments),
            &mut errors,
        );
        drop(span);

        let mut program =
            program.map_err(|err| anyhow!("failed to parse source: {}", err.kind().msg()))?;
        if let Some(err) = errors.first() {
            bail!("failed to parse source: {}", err.kind().msg());
        }

        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();
        program.visit_mut_with(&mut resolver(
            unresolved_mark,
            top_level_mark,
            options.typescript,
        ));

        {
            let _span = tracing::trace_span!("annotate_module_pure").entered();
            program.visit_mut_with(&mut annotate_module_pure(config.clone(), comments.clone()));
        }

        let mut output = vec![];
        {
            let mut emitter = Emitter {
                cfg: codegen::Config::default().with_minify(options.minify),
                cm: cm.clone(),
                wr: Box::new(JsWriter::new(cm.clone(), "\n", &mut output, None)),
                comments: Some(&comments),
            };
            emitter
                .emit_program(&program)
                .context("failed to print annotated source")?;
        }

        String::from_utf8(output).context("codegen generated non-utf8 output")
    })
}
