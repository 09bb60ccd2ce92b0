// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish a goal: train a
// model end to end, or hold the current model for a session of
// predictions.
//
// Rules for this layer:
//   - No ML math here (that's Layer 5)
//   - No printing or prompting here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The end-to-end training workflow
pub mod train_use_case;

// Current-model state shared by the menu and the subcommands
pub mod session;
