//! Session form state.

use fatigue_core::api::{ActivityType, Position, SessionRequest, WireValue};
use fatigue_core::session::{self, FormValidation, SCALE_RANGE, SLEEP_HOURS_RANGE};

const DEFAULT_SLEEP_HOURS: &str = "7";
const DEFAULT_SCALE: u8 = 5;

/// Focusable form rows, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PlayerName,
    Position,
    Activity,
    SleepHours,
    StressLevel,
    DistanceKm,
    SprintCount,
    AdvancedToggle,
    Soreness,
    Rpe,
    InjuryIllness,
    Submit,
}

const BASIC_FIELDS: &[FormField] = &[
    FormField::PlayerName,
    FormField::Position,
    FormField::Activity,
    FormField::SleepHours,
    FormField::StressLevel,
    FormField::DistanceKm,
    FormField::SprintCount,
    FormField::AdvancedToggle,
    FormField::Submit,
];

const ALL_FIELDS: &[FormField] = &[
    FormField::PlayerName,
    FormField::Position,
    FormField::Activity,
    FormField::SleepHours,
    FormField::StressLevel,
    FormField::DistanceKm,
    FormField::SprintCount,
    FormField::AdvancedToggle,
    FormField::Soreness,
    FormField::Rpe,
    FormField::InjuryIllness,
    FormField::Submit,
];

/// Contents of the session form. Numeric text inputs are kept as typed and
/// parsed on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub player_name: String,
    pub position: Position,
    pub activity: ActivityType,
    pub sleep_hours: String,
    pub stress_level: u8,
    pub distance_km: String,
    pub sprint_count: String,
    /// Soreness, RPE and injury are only sent while shown.
    pub show_advanced: bool,
    pub soreness: u8,
    pub rpe: u8,
    pub injury_illness: bool,
    pub focus: FormField,
    pub error: Option<FormValidation>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            position: Position::Goalkeeper,
            activity: ActivityType::Practice,
            sleep_hours: DEFAULT_SLEEP_HOURS.to_string(),
            stress_level: DEFAULT_SCALE,
            distance_km: String::new(),
            sprint_count: String::new(),
            show_advanced: false,
            soreness: DEFAULT_SCALE,
            rpe: DEFAULT_SCALE,
            injury_illness: false,
            focus: FormField::PlayerName,
            error: None,
        }
    }
}

impl FormState {
    /// Restores defaults and hides the advanced fields.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn visible_fields(&self) -> &'static [FormField] {
        if self.show_advanced {
            ALL_FIELDS
        } else {
            BASIC_FIELDS
        }
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let fields = self.visible_fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(fields.len() as isize) as usize;
        self.focus = fields[next];
    }

    pub fn toggle_advanced(&mut self) {
        self.show_advanced = !self.show_advanced;
        if !self.visible_fields().contains(&self.focus) {
            self.focus = FormField::AdvancedToggle;
        }
    }

    /// Text buffer behind the focused field, if it is a text input.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::PlayerName => Some(&mut self.player_name),
            FormField::SleepHours => Some(&mut self.sleep_hours),
            FormField::DistanceKm => Some(&mut self.distance_km),
            FormField::SprintCount => Some(&mut self.sprint_count),
            _ => None,
        }
    }

    /// Whether `c` may be typed into the focused field.
    pub fn accepts_char(&self, c: char) -> bool {
        match self.focus {
            FormField::PlayerName => !c.is_control(),
            FormField::SleepHours | FormField::DistanceKm => c.is_ascii_digit() || c == '.',
            FormField::SprintCount => c.is_ascii_digit(),
            _ => false,
        }
    }

    /// Cycles a select or nudges a slider. Returns whether anything changed.
    pub fn adjust(&mut self, forward: bool) -> bool {
        match self.focus {
            FormField::Position => {
                self.position = cycle(self.position, forward);
                true
            }
            FormField::Activity => {
                self.activity = cycle(self.activity, forward);
                true
            }
            FormField::StressLevel => nudge(&mut self.stress_level, forward),
            FormField::Soreness => nudge(&mut self.soreness, forward),
            FormField::Rpe => nudge(&mut self.rpe, forward),
            FormField::InjuryIllness => {
                self.injury_illness = !self.injury_illness;
                true
            }
            _ => false,
        }
    }

    /// Builds and validates the request body.
    ///
    /// # Errors
    /// Returns the first missing, unparseable or out-of-range field.
    pub fn to_request(&self) -> Result<SessionRequest, FormValidation> {
        // Checked in form order; sliders and pickers are always in range.
        if self.player_name.trim().is_empty() {
            return Err(FormValidation::MissingPlayerName);
        }
        let sleep_hours = parse_number(&self.sleep_hours)
            .filter(|v| SLEEP_HOURS_RANGE.contains(v))
            .ok_or(FormValidation::SleepHours)?;
        let distance_km = parse_number(&self.distance_km).ok_or(FormValidation::DistanceKm)?;
        let sprint_count = self
            .sprint_count
            .trim()
            .parse::<u32>()
            .map_err(|_| FormValidation::SprintCount)?;

        let (soreness, rpe, injury_illness) = if self.show_advanced {
            (Some(self.soreness), Some(self.rpe), Some(self.injury_illness))
        } else {
            (None, None, None)
        };

        let request = SessionRequest {
            player_name: self.player_name.trim().to_string(),
            position: self.position,
            activity_type: self.activity,
            sleep_hours,
            stress_level: self.stress_level,
            distance_km,
            sprint_count,
            soreness,
            rpe,
            injury_illness,
        };
        session::validate(&request)?;
        Ok(request)
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn cycle<T: WireValue + PartialEq>(current: T, forward: bool) -> T {
    let all = T::all();
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

fn nudge(value: &mut u8, up: bool) -> bool {
    let next = if up {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    };
    let next = next.clamp(*SCALE_RANGE.start(), *SCALE_RANGE.end());
    let changed = next != *value;
    *value = next;
    changed
}
