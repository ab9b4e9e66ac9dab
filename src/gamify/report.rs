use super::Resolution;
use crate::db::models::{AwardedBadge, LeaderboardEntry};
use crate::report_helpers::{max_width, pad, separator};

pub fn print_resolution(resolution: &Resolution) {
    println!("{}", resolution.message);
    for badge in &resolution.new_badges {
        println!(" Badge unlocked: {} - {}", badge.name, badge.description);
    }
}

pub fn print_leaderboard(board: &[LeaderboardEntry]) {
    if board.is_empty() {
        println!("No points have been awarded yet.");
        return;
    }
    let name_w = max_width(board.iter().map(|e| e.username.as_str()), 8);
    let sep = separator(name_w + 18);

    println!("Leaderboard");
    println!("{sep}");
    println!(" {:>4}  {}  {:>8}", "Rank", pad("User", name_w), "Points");
    println!("{sep}");
    for (rank, entry) in board.iter().enumerate() {
        println!(
            " {:>4}  {}  {:>8}",
            rank + 1,
            pad(&entry.username, name_w),
            entry.total_points
        );
    }
    println!("{sep}");
}

pub fn print_badges(username: &str, held: &[AwardedBadge]) {
    if held.is_empty() {
        println!("{username} has not earned any badges yet.");
        return;
    }
    let name_w = max_width(held.iter().map(|b| b.badge.name.as_str()), 5);
    let sep = separator(name_w + 50);

    println!("Badges: {username}");
    println!("{sep}");
    for awarded in held {
        println!(
            " {}  {}  {}",
            pad(&awarded.badge.name, name_w),
            awarded.awarded_at.format("%Y-%m-%d"),
            awarded.badge.description
        );
    }
    println!("{sep}");
}
