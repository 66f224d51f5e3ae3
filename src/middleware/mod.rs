//! 핸들러 앞단에서 요청을 가공하는 추출자(Extractor)들

pub mod json_body;

pub use json_body::JsonBody;
