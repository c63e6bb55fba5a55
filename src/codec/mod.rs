mod document_codec;

pub use document_codec::DocumentCodec;
