//! # Caseflow Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Normalizer and reducer throughput
//! └── src/integration/  # Store, bus, workflows and API client together
//!     ├── flows.rs            # One user action, start to settled state
//!     └── e2e_choreography.rs # Concurrency: latest wins, ordering, sessions
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cf-tests
//! cargo test -p cf-tests integration::flows
//! cargo bench -p cf-tests
//! ```

pub mod integration;
