pub mod book;

pub use book::CatalogLoadError;
pub use book::InMemoryBookRepository;
