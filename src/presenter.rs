use core_types::User;
use std::io::{self, Write};

/// Writes the leaderboard listing, ranking users from 1 in the order given.
pub fn write_leaderboard<W: Write>(out: &mut W, users: &[User]) -> io::Result<()> {
    writeln!(out, "Leaderboard:")?;
    for (rank, user) in (1..).zip(users) {
        writeln!(
            out,
            "{}. {} (Email: {}) - Score: {}",
            rank, user.name, user.email, user.high_score
        )?;
    }
    Ok(())
}

/// Prints the leaderboard to `out` (stdout in the binary). A failed write is
/// logged, not returned.
pub fn display_leaderboard<W: Write>(out: &mut W, users: &[User]) {
    if let Err(e) = write_leaderboard(&mut *out, users).and_then(|_| out.flush()) {
        tracing::warn!(error = %e, "Failed to print the leaderboard.");
    }
}
