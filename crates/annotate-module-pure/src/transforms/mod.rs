pub mod annotate_module_pure;
