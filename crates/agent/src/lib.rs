//! The study agent's control loop.
//!
//! A question moves through a fixed cycle of stages:
//!
//! 1. **Plan**: ask the model which tools to use
//! 2. **Execute**: run the next planned tool and collect evidence
//! 3. **Aggregate**: summarize the evidence gathered so far
//! 4. **Reflect**: ask whether the evidence is enough; if not, schedule
//!    one more tool and go back to Execute
//! 5. **Answer**: write the final answer and list its sources
//!
//! The loop ends when the plan runs out or the iteration cap is reached.

pub mod plan_execute;
pub mod prompts;
pub mod state;

pub use plan_execute::{PlanExecuteAgent, Stage};
pub use state::AgentState;

#[cfg(test)]
pub(crate) mod test_helpers;
