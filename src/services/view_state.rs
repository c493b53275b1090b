//! Client-owned screen state: which of the three screens is showing, the
//! calendar's visible month, and whether the day chooser is open.
//!
//! `ViewState::apply` is pure. It returns the next state plus the effects the
//! caller must run against the store, in order.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dates::{next_month, previous_month};
use crate::models::daily_record::DayStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScreenKind {
    Home,
    Calendar,
    Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    Home,
    Calendar {
        year: i32,
        month: u32,
        /// Open chooser for this date when set.
        #[serde(default)]
        selected_date: Option<NaiveDate>,
    },
    Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewState {
    #[serde(flatten)]
    pub screen: Screen,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewAction {
    Navigate { screen: ScreenKind },
    PreviousMonth,
    NextMonth,
    SelectDate { date: NaiveDate },
    CancelSelection,
    ChooseStatus { status: DayStatus },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEffect {
    LoadHome,
    LoadMonth { year: i32, month: u32 },
    LoadGoals,
    UpsertRecord { date: NaiveDate, status: DayStatus },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub effects: Vec<ViewEffect>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("this action is only available on the calendar screen")]
    NotOnCalendar,

    #[error("{date} is not in the visible month {year}-{month:02}")]
    DateOutsideMonth { date: NaiveDate, year: i32, month: u32 },

    #[error("month {0} is not between 1 and 12")]
    InvalidMonth(u32),

    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),
}

/// Month must be 1..=12 and its first day representable.
fn check_month(year: i32, month: u32) -> Result<(), ViewError> {
    if !(1..=12).contains(&month) {
        return Err(ViewError::InvalidMonth(month));
    }
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(ViewError::InvalidYear(year));
    }
    Ok(())
}

fn load_effect(screen: &Screen) -> ViewEffect {
    match screen {
        Screen::Home => ViewEffect::LoadHome,
        Screen::Calendar { year, month, .. } => ViewEffect::LoadMonth {
            year: *year,
            month: *month,
        },
        Screen::Settings => ViewEffect::LoadGoals,
    }
}

impl ViewState {
    /// Effect that (re)loads the data for the current screen.
    pub fn reload_effect(&self) -> ViewEffect {
        load_effect(&self.screen)
    }

    pub fn apply(self, action: ViewAction, today: NaiveDate) -> Result<Transition, ViewError> {
        if let Screen::Calendar { year, month, .. } = self.screen {
            check_month(year, month)?;
        }

        match action {
            ViewAction::Navigate { screen } => {
                let screen = match screen {
                    ScreenKind::Home => Screen::Home,
                    ScreenKind::Calendar => Screen::Calendar {
                        year: today.year(),
                        month: today.month(),
                        selected_date: None,
                    },
                    ScreenKind::Settings => Screen::Settings,
                };
                let effects = vec![load_effect(&screen)];
                Ok(Transition {
                    state: ViewState { screen },
                    effects,
                })
            }

            ViewAction::PreviousMonth | ViewAction::NextMonth => {
                let Screen::Calendar { year, month, .. } = self.screen else {
                    return Err(ViewError::NotOnCalendar);
                };
                let moved = if action == ViewAction::PreviousMonth {
                    previous_month(year, month)
                } else {
                    next_month(year, month)
                };
                let (year, month) = moved.ok_or(ViewError::InvalidYear(year))?;
                check_month(year, month)?;
                Ok(Transition {
                    state: ViewState {
                        screen: Screen::Calendar {
                            year,
                            month,
                            selected_date: None,
                        },
                    },
                    effects: vec![ViewEffect::LoadMonth { year, month }],
                })
            }

            ViewAction::SelectDate { date } => {
                let Screen::Calendar { year, month, .. } = self.screen else {
                    return Err(ViewError::NotOnCalendar);
                };
                // other-month cells are disabled in the grid
                if date.year() != year || date.month() != month {
                    return Err(ViewError::DateOutsideMonth { date, year, month });
                }
                Ok(Transition {
                    state: ViewState {
                        screen: Screen::Calendar {
                            year,
                            month,
                            selected_date: Some(date),
                        },
                    },
                    effects: Vec::new(),
                })
            }

            ViewAction::CancelSelection => {
                let Screen::Calendar { year, month, .. } = self.screen else {
                    return Err(ViewError::NotOnCalendar);
                };
                Ok(Transition {
                    state: ViewState {
                        screen: Screen::Calendar {
                            year,
                            month,
                            selected_date: None,
                        },
                    },
                    effects: Vec::new(),
                })
            }

            ViewAction::ChooseStatus { status } => {
                let Screen::Calendar {
                    year,
                    month,
                    selected_date,
                } = self.screen
                else {
                    return Err(ViewError::NotOnCalendar);
                };
                let Some(date) = selected_date else {
                    return Ok(Transition {
                        state: self,
                        effects: Vec::new(),
                    });
                };
                Ok(Transition {
                    state: ViewState {
                        screen: Screen::Calendar {
                            year,
                            month,
                            selected_date: None,
                        },
                    },
                    effects: vec![
                        ViewEffect::UpsertRecord { date, status },
                        ViewEffect::LoadMonth { year, month },
                    ],
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn calendar(selected: Option<NaiveDate>) -> ViewState {
        ViewState {
            screen: Screen::Calendar {
                year: 2026,
                month: 10,
                selected_date: selected,
            },
        }
    }

    #[test]
    fn test_starts_on_home() {
        assert_eq!(ViewState::default().screen, Screen::Home);
    }

    #[test]
    fn test_navigate_to_calendar_opens_current_month() {
        let t = ViewState::default()
            .apply(ViewAction::Navigate { screen: ScreenKind::Calendar }, today())
            .unwrap();
        assert_eq!(t.state, calendar(None));
        assert_eq!(t.effects, vec![ViewEffect::LoadMonth { year: 2026, month: 10 }]);
    }

    #[test]
    fn test_navigate_away_drops_selection() {
        let t = calendar(Some(today()))
            .apply(ViewAction::Navigate { screen: ScreenKind::Settings }, today())
            .unwrap();
        assert_eq!(t.state.screen, Screen::Settings);
        assert_eq!(t.effects, vec![ViewEffect::LoadGoals]);
    }

    #[test]
    fn test_month_navigation_wraps_and_clears_selection() {
        let dec = ViewState {
            screen: Screen::Calendar {
                year: 2026,
                month: 12,
                selected_date: Some(NaiveDate::from_ymd_opt(2026, 12, 3).unwrap()),
            },
        };
        let t = dec.apply(ViewAction::NextMonth, today()).unwrap();
        assert_eq!(
            t.state.screen,
            Screen::Calendar { year: 2027, month: 1, selected_date: None }
        );

        let t = t.state.apply(ViewAction::PreviousMonth, today()).unwrap();
        assert_eq!(t.effects, vec![ViewEffect::LoadMonth { year: 2026, month: 12 }]);
    }

    #[test]
    fn test_select_then_choose_upserts_and_reloads() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        let t = calendar(None)
            .apply(ViewAction::SelectDate { date }, today())
            .unwrap();
        assert_eq!(t.state, calendar(Some(date)));
        assert!(t.effects.is_empty());

        let t = t
            .state
            .apply(ViewAction::ChooseStatus { status: DayStatus::Rest }, today())
            .unwrap();
        assert_eq!(t.state, calendar(None));
        assert_eq!(
            t.effects,
            vec![
                ViewEffect::UpsertRecord { date, status: DayStatus::Rest },
                ViewEffect::LoadMonth { year: 2026, month: 10 },
            ]
        );
    }

    #[test]
    fn test_choose_without_selection_is_noop() {
        let t = calendar(None)
            .apply(ViewAction::ChooseStatus { status: DayStatus::Drink }, today())
            .unwrap();
        assert_eq!(t.state, calendar(None));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_cancel_closes_chooser() {
        let t = calendar(Some(today()))
            .apply(ViewAction::CancelSelection, today())
            .unwrap();
        assert_eq!(t.state, calendar(None));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_select_outside_visible_month_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
        let err = calendar(None)
            .apply(ViewAction::SelectDate { date }, today())
            .unwrap_err();
        assert!(matches!(err, ViewError::DateOutsideMonth { .. }));
    }

    #[test]
    fn test_calendar_actions_require_calendar() {
        for action in [
            ViewAction::PreviousMonth,
            ViewAction::NextMonth,
            ViewAction::CancelSelection,
            ViewAction::SelectDate { date: today() },
            ViewAction::ChooseStatus { status: DayStatus::Rest },
        ] {
            let err = ViewState::default().apply(action, today()).unwrap_err();
            assert_eq!(err, ViewError::NotOnCalendar);
        }
    }

    #[test]
    fn test_invalid_month_in_state_rejected() {
        let state = ViewState {
            screen: Screen::Calendar { year: 2026, month: 13, selected_date: None },
        };
        let err = state.apply(ViewAction::NextMonth, today()).unwrap_err();
        assert_eq!(err, ViewError::InvalidMonth(13));
    }

    #[test]
    fn test_unrepresentable_year_rejected() {
        let state = ViewState {
            screen: Screen::Calendar { year: i32::MAX, month: 12, selected_date: None },
        };
        let err = state.apply(ViewAction::NextMonth, today()).unwrap_err();
        assert_eq!(err, ViewError::InvalidYear(i32::MAX));

        let state = ViewState {
            screen: Screen::Calendar { year: i32::MIN, month: 1, selected_date: None },
        };
        let err = state.apply(ViewAction::PreviousMonth, today()).unwrap_err();
        assert_eq!(err, ViewError::InvalidYear(i32::MIN));
    }

    #[test]
    fn test_navigation_past_last_supported_year_rejected() {
        let last_year = NaiveDate::MAX.year();
        let state = ViewState {
            screen: Screen::Calendar { year: last_year, month: 12, selected_date: None },
        };
        let err = state.apply(ViewAction::NextMonth, today()).unwrap_err();
        assert_eq!(err, ViewError::InvalidYear(last_year + 1));
    }

    #[test]
    fn test_state_wire_format() {
        let json = serde_json::to_value(calendar(Some(today()))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "screen": "calendar",
                "year": 2026,
                "month": 10,
                "selected_date": "2026-10-16"
            })
        );

        let home: ViewState = serde_json::from_value(serde_json::json!({ "screen": "home" })).unwrap();
        assert_eq!(home, ViewState::default());

        let action: ViewAction =
            serde_json::from_value(serde_json::json!({ "type": "choose_status", "status": "unset" }))
                .unwrap();
        assert_eq!(action, ViewAction::ChooseStatus { status: DayStatus::Unset });
    }
}
