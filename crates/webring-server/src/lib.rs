pub mod context;
pub mod http_server;
pub mod template;

pub use context::WebringContext;
pub use http_server::HttpServer;
pub use template::Template;
