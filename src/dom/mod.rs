pub mod capability;
pub mod dom_model;
pub mod selector;
pub mod static_page;
