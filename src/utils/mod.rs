pub mod base62;
