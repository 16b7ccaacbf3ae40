pub mod backend;

pub use backend::HttpStudyService;
