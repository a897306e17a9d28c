mod url;

pub use self::url::{CreateUrlDto, IndexQuery, UrlRecord, UrlResponseDto};
