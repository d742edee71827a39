use std::io::{self, BufRead, Write};
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

const DUMMY_RESPONSES: &[&str] = &[
    "Dette er en dummy-widget. Den ekte chatboten vil bli lastet fra et separat repo.",
    "Jeg kan dessverre ikke svare ennå - jeg er bare en placeholder!",
    "Når den ekte boten er klar, vil du kunne spørre om fag, fordypningskrav og mer.",
    "Takk for at du tester! Den virkelige fagvalg-assistenten kommer snart.",
    "Visste du at BPG har over 30 programfag å velge mellom? Den ekte boten kan fortelle deg mer!",
];

/// Placeholder assistant that answers with a random canned reply.
#[derive(Debug, Default)]
pub struct DummyChat {
    pub transcript: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub from_user: bool,
    pub content: String,
}

impl DummyChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the user's message. Blank input is ignored and returns false.
    pub fn submit(&mut self, input: &str) -> bool {
        let message = input.trim();
        if message.is_empty() {
            return false;
        }
        self.transcript.push(ChatMessage {
            from_user: true,
            content: message.to_string(),
        });
        true
    }

    pub fn last_question(&self) -> Option<&str> {
        self.transcript
            .iter()
            .rev()
            .find(|m| m.from_user)
            .map(|m| m.content.as_str())
    }

    pub fn reply<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &str {
        let content = DUMMY_RESPONSES.choose(rng).copied().unwrap_or_default();
        self.transcript.push(ChatMessage {
            from_user: false,
            content: content.to_string(),
        });
        content
    }
}

/// Simulated typing time, 1–2 s.
pub fn reply_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.gen_range(1000..2000))
}

/// Answer each input line until EOF. Blank lines are skipped, not treated as an exit.
pub async fn converse<I: BufRead, W: Write>(
    mut input: I,
    out: &mut W,
    paced: bool,
) -> io::Result<DummyChat> {
    let mut bot = DummyChat::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if !bot.submit(&line) {
            continue;
        }
        debug!(question = bot.last_question().unwrap_or_default(), "Chat question");
        if paced {
            writeln!(out, "...")?;
            out.flush()?;
            tokio::time::sleep(reply_delay(&mut rand::thread_rng())).await;
        }
        let reply = bot.reply(&mut rand::thread_rng());
        writeln!(out, "{}", reply)?;
    }
    Ok(bot)
}
