use bullplanner_core::{DisplayTime, Meridiem, WallTime};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum TimeAction {
    /// 24-hour "HH:mm" to 12-hour display form
    To12 {
        /// Time such as "13:05"
        time: WallTime,
    },
    /// 12-hour parts to canonical "HH:mm"
    To24 {
        /// Hour 1-12
        hour: u8,
        /// Minute 0-59
        minute: u8,
        /// AM or PM
        meridiem: Meridiem,
    },
}

pub fn run(action: TimeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimeAction::To12 { time } => println!("{}", time.to_display()),
        TimeAction::To24 {
            hour,
            minute,
            meridiem,
        } => {
            let time = DisplayTime::new(hour, minute, meridiem).to_canonical()?;
            println!("{time}");
        }
    }
    Ok(())
}
