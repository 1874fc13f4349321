//! `studyagent chat`: interactive question loop.

use std::future::Future;
use std::io::Write;
use studyagent_config::AppConfig;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

/// Why the question loop stopped.
#[derive(Debug, PartialEq, Eq)]
enum Exit {
    EndOfInput,
    Interrupted,
}

pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::build_agent(&config)?;
    info!(provider = %config.default_provider, model = %super::model(&config), "Starting study agent");

    println!("Study Agent (Plan–Execute). Type your question (Ctrl+C to quit).");

    let agent = &agent;
    let exit = repl(
        BufReader::new(tokio::io::stdin()),
        move |question: String| async move {
            let state = agent.run(&question).await;
            super::ask::print_answer(&state);
        },
        interrupted(),
    )
    .await?;

    if exit == Exit::Interrupted {
        println!();
        info!("Exiting");
    }
    Ok(())
}

/// Resolves on the first Ctrl+C. Never resolves if the handler can't be
/// installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Read questions from `input` and hand each non-blank one to `answer`.
///
/// One `interrupt` future spans the whole session, so it fires both at the
/// prompt and while an answer is in flight. An in-flight answer is dropped.
async fn repl<R, A, Fut, I>(input: R, mut answer: A, interrupt: I) -> std::io::Result<Exit>
where
    R: AsyncBufRead + Unpin,
    A: FnMut(String) -> Fut,
    Fut: Future<Output = ()>,
    I: Future<Output = ()>,
{
    tokio::pin!(interrupt);
    let mut lines = input.lines();

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = &mut interrupt => return Ok(Exit::Interrupted),
        };

        // EOF
        let Some(question) = line else {
            return Ok(Exit::EndOfInput);
        };
        let question = question.trim();
        if question.is_empty() {
            continue;
        }

        tokio::select! {
            () = answer(question.to_string()) => {}
            () = &mut interrupt => return Ok(Exit::Interrupted),
        }
    }
}
