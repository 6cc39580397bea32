pub mod blockquote;
pub mod case;
pub mod config;
pub mod convert;
pub mod entities;
pub mod error;
pub mod fetch;
pub mod links;
pub mod pre;
pub mod rules;
pub mod strip;
pub mod wrap;

pub use config::{
    ConversionConfig, ConversionConfigBuilder, DEFAULT_LINE_WIDTH, LinkStyle, MIN_LINE_WIDTH, apply_config_file,
    apply_config_json, default_config_path, load_config,
};
pub use convert::{ConversionState, TextConverter, convert_to_text};
pub use error::{PlainifyError, Result};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{FetchConfig, fetch_file, fetch_stdin, parse_http_url, url_origin};
#[doc(hidden)]
pub use links::{LinkCollector, LinkTable};
