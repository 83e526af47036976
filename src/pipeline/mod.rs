// Pipelines: the offline artifact build.

pub mod build;
