// Memory module - Mapped buffer allocation for the video surfaces
//
// Provides anonymous memory mappings with a huge-page first attempt and a
// plain-mapping fallback, released automatically on drop.

pub mod mapping;

pub use mapping::MappedBuffer;
