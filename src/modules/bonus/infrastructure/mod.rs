pub mod taxonomy_loader;

pub use taxonomy_loader::TaxonomyLoader;
