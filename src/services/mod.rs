// Service module exports

pub mod form;
pub mod settings;
pub mod timeline;
