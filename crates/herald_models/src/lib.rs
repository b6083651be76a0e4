//! Language-model backends for herald caption generation.
//!
//! # Available Providers
//!
//! - **Ollama** - local generation server (`/api/generate`)
//!
//! # Example
//!
//! ```no_run
//! use herald_core::GenerateRequest;
//! use herald_interface::TextGenerator;
//! use herald_models::OllamaClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new("llama3.1:latest")?;
//! let request = GenerateRequest::builder()
//!     .model(client.model_name())
//!     .prompt("Say hello")
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ollama;

pub use ollama::{DEFAULT_OLLAMA_URL, OllamaClient};
