//! Notification Preferences
//!
//! Six notification channels, two of them mandatory. Preferences are
//! client-only state: saving commits them for the rest of the session and
//! confirms to the user, but nothing is sent to the server and nothing
//! survives a reload.
//!
//! The save flow is split in two so the caller owns the delay:
//!
//! ```text
//! Idle --begin_save--> Saving --(SAVE_DELAY_MS)--> finish_save --> Idle
//!                                                  ├─ host.confirm(SAVE_CONFIRMATION)
//!                                                  └─ host.navigate_back()
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulated save latency
pub const SAVE_DELAY_MS: u32 = 1200;

/// Message shown once a save completes
pub const SAVE_CONFIRMATION: &str = "Settings saved!";

/// A notification the user may receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    PaymentConfirmation,
    ETicket,
    DayBeforeReminder,
    ScheduleChange,
    Newsletter,
    SpecialDiscount,
}

/// Section a channel is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelGroup {
    Transactions,
    Reminders,
    Promotions,
}

impl ChannelGroup {
    pub const ALL: [ChannelGroup; 3] = [
        ChannelGroup::Transactions,
        ChannelGroup::Reminders,
        ChannelGroup::Promotions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChannelGroup::Transactions => "Tickets & Transactions",
            ChannelGroup::Reminders => "Event Reminders",
            ChannelGroup::Promotions => "Promotions & Recommendations",
        }
    }

    pub fn channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| c.group() == *self)
            .collect()
    }
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::PaymentConfirmation,
        Channel::ETicket,
        Channel::DayBeforeReminder,
        Channel::ScheduleChange,
        Channel::Newsletter,
        Channel::SpecialDiscount,
    ];

    /// Mandatory transactional notifications cannot be turned off
    pub fn is_locked(&self) -> bool {
        matches!(self, Channel::PaymentConfirmation | Channel::ETicket)
    }

    pub fn group(&self) -> ChannelGroup {
        match self {
            Channel::PaymentConfirmation | Channel::ETicket => ChannelGroup::Transactions,
            Channel::DayBeforeReminder | Channel::ScheduleChange => ChannelGroup::Reminders,
            Channel::Newsletter | Channel::SpecialDiscount => ChannelGroup::Promotions,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Channel::PaymentConfirmation => "Payment Confirmation",
            Channel::ETicket => "E-Ticket",
            Channel::DayBeforeReminder => "Day-Before Reminder",
            Channel::ScheduleChange => "Schedule Changes",
            Channel::Newsletter => "Newsletter",
            Channel::SpecialDiscount => "Special Discounts",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Channel::PaymentConfirmation => "Email me when a payment succeeds",
            Channel::ETicket => "Send my digital ticket by email",
            Channel::DayBeforeReminder => "Notify me 24 hours before the event starts",
            Channel::ScheduleChange => "Notify me when the time or venue changes",
            Channel::Newsletter => "Weekly news about upcoming events",
            Channel::SpecialDiscount => "Ticket promos and vouchers",
        }
    }
}

/// Errors from the preference panel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("{} is required and cannot be turned off", .0.title())]
    Locked(Channel),

    #[error("Settings are already being saved")]
    SaveInProgress,
}

/// User-editable notification flags; locked channels are implicitly on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub day_before_reminder: bool,
    pub schedule_change: bool,
    pub newsletter: bool,
    pub special_discount: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            day_before_reminder: true,
            schedule_change: true,
            newsletter: false,
            special_discount: false,
        }
    }
}

impl NotificationPreferences {
    pub fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::PaymentConfirmation | Channel::ETicket => true,
            Channel::DayBeforeReminder => self.day_before_reminder,
            Channel::ScheduleChange => self.schedule_change,
            Channel::Newsletter => self.newsletter,
            Channel::SpecialDiscount => self.special_discount,
        }
    }

    /// Flip a channel, returning its new state
    pub fn toggle(&mut self, channel: Channel) -> Result<bool, PreferenceError> {
        let flag = match channel {
            Channel::PaymentConfirmation | Channel::ETicket => {
                return Err(PreferenceError::Locked(channel))
            }
            Channel::DayBeforeReminder => &mut self.day_before_reminder,
            Channel::ScheduleChange => &mut self.schedule_change,
            Channel::Newsletter => &mut self.newsletter,
            Channel::SpecialDiscount => &mut self.special_discount,
        };
        *flag = !*flag;
        Ok(*flag)
    }
}

/// Side effects of a completed save
pub trait SaveHost {
    /// Show the confirmation to the user
    fn confirm(&mut self, message: &str);

    /// Go back one step in history
    fn navigate_back(&mut self);
}

/// Preference panel: working copy plus save state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationPanel {
    preferences: NotificationPreferences,
    saving: bool,
}

impl NotificationPanel {
    /// Start editing from previously committed preferences
    pub fn new(preferences: NotificationPreferences) -> Self {
        Self {
            preferences,
            saving: false,
        }
    }

    pub fn preferences(&self) -> NotificationPreferences {
        self.preferences
    }

    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.preferences.is_enabled(channel)
    }

    pub fn toggle(&mut self, channel: Channel) -> Result<bool, PreferenceError> {
        self.preferences.toggle(channel)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Enter the saving state; rejected while a save is pending
    pub fn begin_save(&mut self) -> Result<(), PreferenceError> {
        if self.saving {
            return Err(PreferenceError::SaveInProgress);
        }
        self.saving = true;
        tracing::debug!("Saving notification preferences");
        Ok(())
    }

    /// Complete a pending save: confirm once, go back once, and return the
    /// committed preferences. Does nothing when no save is pending.
    pub fn finish_save(&mut self, host: &mut impl SaveHost) -> Option<NotificationPreferences> {
        if !self.saving {
            return None;
        }
        self.saving = false;
        host.confirm(SAVE_CONFIRMATION);
        host.navigate_back();
        Some(self.preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        confirmations: Vec<String>,
        back_navigations: usize,
    }

    impl SaveHost for RecordingHost {
        fn confirm(&mut self, message: &str) {
            self.confirmations.push(message.to_string());
        }

        fn navigate_back(&mut self) {
            self.back_navigations += 1;
        }
    }

    fn assert_locked_on(panel: &NotificationPanel) {
        for channel in [Channel::PaymentConfirmation, Channel::ETicket] {
            assert!(channel.is_locked());
            assert!(panel.is_enabled(channel));
        }
    }

    #[test]
    fn test_defaults() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.is_enabled(Channel::PaymentConfirmation));
        assert!(prefs.is_enabled(Channel::ETicket));
        assert!(prefs.is_enabled(Channel::DayBeforeReminder));
        assert!(prefs.is_enabled(Channel::ScheduleChange));
        assert!(!prefs.is_enabled(Channel::Newsletter));
        assert!(!prefs.is_enabled(Channel::SpecialDiscount));
    }

    #[test]
    fn test_locked_channels_cannot_be_toggled() {
        let mut panel = NotificationPanel::default();
        assert_eq!(
            panel.toggle(Channel::ETicket),
            Err(PreferenceError::Locked(Channel::ETicket))
        );
        assert_locked_on(&panel);
        assert_eq!(
            PreferenceError::Locked(Channel::PaymentConfirmation).to_string(),
            "Payment Confirmation is required and cannot be turned off"
        );
    }

    #[test]
    fn test_free_channels_toggle() {
        let mut panel = NotificationPanel::default();
        assert_eq!(panel.toggle(Channel::Newsletter), Ok(true));
        assert_eq!(panel.toggle(Channel::DayBeforeReminder), Ok(false));
        assert_eq!(panel.toggle(Channel::Newsletter), Ok(false));
        assert!(!panel.preferences().day_before_reminder);
    }

    #[test]
    fn test_save_confirms_once_and_goes_back_once() {
        let mut panel = NotificationPanel::default();
        let mut host = RecordingHost::default();

        panel.toggle(Channel::SpecialDiscount).unwrap();
        panel.begin_save().unwrap();
        assert!(panel.is_saving());
        assert_locked_on(&panel);

        // a second click while saving is rejected
        assert_eq!(panel.begin_save(), Err(PreferenceError::SaveInProgress));

        let committed = panel.finish_save(&mut host).unwrap();
        assert!(committed.special_discount);
        assert!(!panel.is_saving());
        assert_locked_on(&panel);

        // a stray completion does nothing
        assert_eq!(panel.finish_save(&mut host), None);

        assert_eq!(host.confirmations, vec![SAVE_CONFIRMATION.to_string()]);
        assert_eq!(host.back_navigations, 1);
    }

    #[test]
    fn test_groups_cover_every_channel_once() {
        let listed: Vec<Channel> = ChannelGroup::ALL
            .iter()
            .flat_map(|g| g.channels())
            .collect();
        assert_eq!(listed, Channel::ALL.to_vec());
        assert!(ChannelGroup::Transactions
            .channels()
            .iter()
            .all(Channel::is_locked));
    }
}
