//! Command implementations for relgen-cli

pub mod bundle;
pub mod policy;
pub mod serve;
pub mod variations;

pub use bundle::{run_bundle_gen, run_bundle_list};
pub use policy::{run_policy_check, run_policy_resolve, run_policy_show};
pub use serve::run_serve;
pub use variations::{
    run_variations_dump, run_variations_dump_dir, run_variations_get, run_variations_outputs,
};
