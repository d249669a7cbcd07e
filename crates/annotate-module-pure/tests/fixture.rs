use std::{fs::read_to_string, path::PathBuf};

use annotate_module_pure::transforms::annotate_module_pure::{Config, annotate_module_pure};
use swc_core::{
    common::Mark,
    ecma::{
        parser::{EsSyntax, Syntax},
        transforms::{
            base::resolver,
            testing::{FixtureTestConfig, test_fixture},
        },
    },
};
use testing::fixture;

fn syntax() -> Syntax {
    Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
    })
}

#[fixture("tests/fixture/**/input.js")]
fn annotate_module_pure_fixture(input: PathBuf) {
    let dir = input.parent().unwrap();
    let output = dir.join("output.js");
    let config = Config::from_json(&read_to_string(dir.join("config.json")).unwrap()).unwrap();

    test_fixture(
        syntax(),
        &|tr| {
            let unresolved_mark = Mark::new();
            (
                resolver(unresolved_mark, Mark::new(), false),
                annotate_module_pure(config.clone(), tr.comments.as_ref().clone()),
            )
        },
        &input,
        &output,
        FixtureTestConfig {
            module: Some(true),
            ..Default::default()
        },
    );
}
