//! Plain-text collaborators: the board goes to stdout, one line per event.

use std::time::Duration;
use strictly_reversi::{AnimationDriver, Board, Coordinate, Disk, Notifier};
use tracing::debug;

/// Board with column letters and 1-based row numbers.
pub fn render(board: &Board) -> String {
    let mut out = String::from("   a b c d e f g h\n");
    for (y, row) in board.rows().iter().enumerate() {
        out.push_str(&format!("{:>2}", y + 1));
        for cell in row {
            out.push(' ');
            out.push(cell.symbol());
        }
        out.push('\n');
    }
    out
}

/// Prints notifications as they arrive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

#[async_trait::async_trait]
impl Notifier for ConsoleNotifier {
    fn board_changed(&self, board: &Board) {
        println!("{}", render(board));
    }

    fn turn_changed(&self, turn: Option<Disk>) {
        match turn {
            Some(side) => println!("{} ({}) to move", side, side.symbol()),
            None => println!("Game over"),
        }
    }

    fn counts_changed(&self, dark: usize, light: usize) {
        println!("Dark {} - Light {}", dark, light);
    }

    fn busy(&self, side: Disk, busy: bool) {
        if busy {
            println!("{} is thinking...", side);
        } else {
            debug!(%side, "Thinking stopped");
        }
    }

    async fn pass(&self, side: Disk) {
        println!("{} has no legal move and passes", side);
    }
}

/// Prints each changed cell after a short pause.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleAnimation {
    step: Duration,
}

impl ConsoleAnimation {
    /// Animation pausing `step` per cell.
    pub fn new(step: Duration) -> Self {
        Self { step }
    }
}

#[async_trait::async_trait]
impl AnimationDriver for ConsoleAnimation {
    async fn flip(&mut self, coordinate: Coordinate, disk: Disk) -> bool {
        tokio::time::sleep(self.step).await;
        println!("  {} -> {}", coordinate, disk.symbol());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_start_position() {
        let text = render(&Board::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "   a b c d e f g h");
        assert_eq!(lines[4], " 4 - - - o x - - -");
        assert_eq!(lines[5], " 5 - - - x o - - -");
    }

    #[tokio::test(start_paused = true)]
    async fn test_animation_waits_per_step() {
        let mut animation = ConsoleAnimation::new(Duration::from_millis(60));
        let started = tokio::time::Instant::now();
        assert!(animation.flip(Coordinate::new(3, 2).unwrap(), Disk::Dark).await);
        assert!(started.elapsed() >= Duration::from_millis(60));
    }
}
