//! Core orchestration: MIME detection, dispatch, configuration, pipeline.

pub mod config;
pub mod dispatcher;
pub mod mime;
pub mod pipeline;
