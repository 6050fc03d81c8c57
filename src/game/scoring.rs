/// Points for any correct answer.
pub const BASE_POINTS: u32 = 10;
/// Extra points for a correct answer given instantly.
pub const MAX_TIME_BONUS: u32 = 5;

/// Whole seconds left on the current question of a session started at
/// `started_at`, assuming every earlier question used up its full slot.
///
/// None when the session has not been started. The result never exceeds
/// `time_limit`, even if the clock went backwards.
pub fn time_remaining(
    started_at: f64,
    question_index: usize,
    time_limit: u32,
    now: f64,
) -> Option<u32> {
    if started_at <= 0.0 {
        return None;
    }
    let limit = f64::from(time_limit);
    let elapsed = now - started_at;
    let question_elapsed = elapsed - question_index as f64 * limit;
    let remaining = (limit - question_elapsed).ceil().clamp(0.0, limit);
    Some(remaining as u32)
}

/// Points for an answer given with `time_remaining` seconds left.
pub fn points_for(correct: bool, time_remaining: u32, time_limit: u32) -> u32 {
    if !correct {
        return 0;
    }
    if time_limit == 0 {
        return BASE_POINTS;
    }
    let bonus = (f64::from(time_remaining) / f64::from(time_limit) * f64::from(MAX_TIME_BONUS))
        .floor() as u32;
    BASE_POINTS + bonus.min(MAX_TIME_BONUS)
}

/// `score / total_questions * 100`, 0 for an empty game.
pub fn accuracy(score: u32, total_questions: usize) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }
    f64::from(score) / total_questions as f64 * 100.0
}
