//! Interactive chat loop.
//!
//! Reads lines from stdin, runs each one as a turn against the session, and
//! renders the assistant's reply as it streams. Turn errors are displayed
//! and contained; the loop keeps running.

use std::io::Write as _;

use relay::session::WorkflowSession;
use relay::transcript::Transcript;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::Result;

/// Run the interactive chat loop until EOF or an exit command.
pub async fn run(session: &WorkflowSession) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut transcript = Transcript::new();

    println!("Relay chat. Type 'exit' to quit.");

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }

        run_turn(session, &mut transcript, input).await;
    }

    debug!(turns = transcript.len(), "chat session ended");
    Ok(())
}

/// Run one turn, rendering streamed output and containing errors.
async fn run_turn(session: &WorkflowSession, transcript: &mut Transcript, input: &str) {
    print!("Assistant: ");
    let _ = std::io::stdout().flush();

    // The callback receives the full response so far; print only the part
    // not rendered yet. The response grows append-only, so the byte offset
    // always lands on a char boundary.
    let mut printed = 0_usize;
    let result = session
        .run_turn_streamed(transcript, input, |partial| {
            print!("{}", &partial[printed..]);
            printed = partial.len();
            let _ = std::io::stdout().flush();
        })
        .await;

    match result {
        Ok(reply) => {
            if printed == 0 {
                // Non-streaming path: the whole reply arrives at once.
                print!("{reply}");
            }
            println!();
        }
        Err(e) => {
            println!();
            println!("An error occurred: {e}");
        }
    }
}
