//! envcheck core
//!
//! Schema-driven validation of process environment variables, used as a
//! pre-flight check before an application starts.
//!
//! ## Architecture
//!
//! 1. **Schema** (`schema`): ordered [`VariableRule`]s loaded from YAML.
//! 2. **Examples** (`example`): sample values shown in error messages.
//! 3. **Diagnostics** (`diagnostic`): [`ValidationError`] and
//!    [`UnexpectedVariable`] with their rendered form.
//! 4. **Environment** (`env`): [`EnvLookup`], [`EnvSnapshot`] and `.env`
//!    parsing.
//! 5. **Validator** (`validator`): checks one rule.
//! 6. **Strict mode** (`strict`): finds undeclared prefixed variables.
//! 7. **Engine** (`engine`): runs a whole schema into a [`ValidationReport`].
//! 8. **Template** (`template`): the starter schema.
//!
//! ## Example
//!
//! ```rust
//! use envcheck_core::{EnvSnapshot, Schema, ValidationEngine, ValidationOptions};
//!
//! let schema = Schema::from_yaml_str(
//!     "variables:\n  - name: APP_PORT\n    type: int\n    required: true\n",
//! )
//! .unwrap();
//! let env: EnvSnapshot = [("APP_PORT", "8080")].into_iter().collect();
//!
//! let engine = ValidationEngine::new(ValidationOptions::new().with_strict_mode(true));
//! let report = engine.validate(&schema, &env);
//! assert!(report.passed());
//! ```

pub mod diagnostic;
pub mod engine;
pub mod env;
pub mod error;
pub mod example;
pub mod schema;
pub mod strict;
pub mod template;
pub mod validator;

pub use diagnostic::{UnexpectedVariable, ValidationError, ValidationErrorKind};
pub use engine::{ValidationEngine, ValidationOptions, ValidationReport};
pub use env::{DotEnvFile, EnvLookup, EnvSnapshot};
pub use error::{EnvCheckError, Result};
pub use example::example_value;
pub use schema::{Schema, VarType, VariableRule};
pub use strict::{find_unexpected, DEFAULT_PREFIX};
pub use validator::{validate_variable, ResolvedVariable};
