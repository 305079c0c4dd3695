mod selection_service;

pub use selection_service::SelectionService;
