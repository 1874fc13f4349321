//! `studyagent ask`: answer one question.

use studyagent_agent::AgentState;
use studyagent_config::AppConfig;

pub async fn run(config: AppConfig, question: &str, trace: bool) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::build_agent(&config)?;
    let state = agent.run(question).await;

    print_answer(&state);
    if trace {
        print_trace(&state);
    }
    Ok(())
}

pub fn print_answer(state: &AgentState) {
    println!("\n=== Answer ===");
    println!("{}", state.answer.as_deref().unwrap_or_default());
}

fn print_trace(state: &AgentState) {
    println!("\n=== Trace ===");
    for entry in state.scratchpad() {
        println!("  {entry}");
    }
    if state.iteration_limit_reached {
        println!("  (stopped at the iteration limit after {} passes)", state.iterations);
    }

    println!("\n=== Evidence ===");
    for (i, ev) in state.evidence().iter().enumerate() {
        println!("  [{}] {}", i + 1, ev.source);
    }
}
