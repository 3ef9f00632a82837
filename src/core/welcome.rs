//! Time-of-day greeting shown while the timeline is empty.

use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    /// 5-11 morning, 12-17 afternoon, 18-21 evening, anything else night.
    pub fn from_hour(hour: u32) -> DayPeriod {
        match hour {
            5..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            18..=21 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }
}

const AFTERNOON: [&str; 3] = [
    "Good afternoon! How can I help you move forward?",
    "I hope your day is going well. What's our next task?",
    "A creative break? Or a problem to solve?",
];

const EVENING: [&str; 3] = [
    "Good evening. The perfect time to explore a new idea.",
    "How was your day? Ready to unwind or to wrap up a project?",
    "The evening is good for reflection. What can I do for you?",
];

const NIGHT: [&str; 3] = [
    "It's getting late. One last thought or a question for the night?",
    "The best ideas are often born at night. Do you have one to share?",
    "Good evening. I'm here if inspiration keeps you awake.",
];

/// Candidate greetings for a period. The first morning greeting carries the
/// user's name when one is configured.
pub fn greetings(period: DayPeriod, user_name: Option<&str>) -> Vec<String> {
    match period {
        DayPeriod::Morning => {
            let first = match user_name.filter(|n| !n.trim().is_empty()) {
                Some(name) => format!("Good morning {}. Ready to start the day?", name.trim()),
                None => "Good morning. Ready to start the day?".to_string(),
            };
            vec![
                first,
                "A coffee, an idea? Good morning!".to_string(),
                "What shall we create this morning?".to_string(),
            ]
        }
        DayPeriod::Afternoon => AFTERNOON.iter().map(|s| s.to_string()).collect(),
        DayPeriod::Evening => EVENING.iter().map(|s| s.to_string()).collect(),
        DayPeriod::Night => NIGHT.iter().map(|s| s.to_string()).collect(),
    }
}

/// Greeting picked once per clock hour.
#[derive(Debug, Clone)]
pub struct Welcome {
    pub text: String,
    hour: Option<u32>,
}

impl Default for Welcome {
    fn default() -> Self {
        Self::new()
    }
}

impl Welcome {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            hour: None,
        }
    }

    /// Re-pick the greeting if the hour changed. Returns true if it did.
    pub fn refresh<R: Rng + ?Sized>(
        &mut self,
        hour: u32,
        user_name: Option<&str>,
        rng: &mut R,
    ) -> bool {
        if self.hour == Some(hour) {
            return false;
        }
        let pool = greetings(DayPeriod::from_hour(hour), user_name);
        self.text = pool.choose(rng).cloned().unwrap_or_default();
        self.hour = Some(hour);
        true
    }
}
