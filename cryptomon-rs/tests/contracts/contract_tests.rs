//! Contract Tests - Ownership Invariant Protection
//!
//! This file aggregates all contract test modules.
//! Contract tests verify invariants that MUST NEVER BREAK.

// Contract test modules
mod contracts {
    // Owner recorded at deployment
    mod ownership {
        include!("ownership_contracts.rs");
    }

    // Deployment module declaration
    mod descriptor {
        include!("descriptor_contracts.rs");
    }
}
