// components.rs
use std::time::Duration;

use bevy::prelude::*;

use crate::error::SetupError;

pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(2);

/// Interaction state of an object, driven by whatever input source is plugged in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Normal,
    Hover,
    Select,
    Disabled,
}

/// Surface color for each interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePalette {
    pub normal: Color,
    pub hover: Color,
    pub select: Color,
    pub disabled: Color,
}

impl Default for StatePalette {
    fn default() -> Self {
        Self {
            normal: Color::srgb(1.0, 0.0, 0.0),
            hover: Color::srgb(0.0, 0.0, 1.0),
            select: Color::srgb(0.0, 1.0, 0.0),
            disabled: Color::srgb(0.0, 0.0, 0.0),
        }
    }
}

impl StatePalette {
    pub fn color_for(&self, state: InteractionState) -> Color {
        match state {
            InteractionState::Normal => self.normal,
            InteractionState::Hover => self.hover,
            InteractionState::Select => self.select,
            InteractionState::Disabled => self.disabled,
        }
    }
}

/// What the visualizer has to do after a state event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateReaction {
    pub color: Color,
    /// Set only when the state moved into `Select` from something else.
    pub entered_select: bool,
}

/// Recolors an interactable from its interaction state and reports it as
/// found when it gets selected.
#[derive(Component, Debug, Clone)]
pub struct InteractableVisualizer {
    palette: StatePalette,
    item_label: Entity,
    item_name: String,
    notification_panel: Entity,
    notification_duration: Duration,
    applied: Option<InteractionState>,
    hide_timer: Option<Timer>,
}

impl InteractableVisualizer {
    pub fn builder() -> VisualizerBuilder {
        VisualizerBuilder::default()
    }

    pub fn apply(&mut self, state: InteractionState) -> StateReaction {
        let entered_select =
            state == InteractionState::Select && self.applied != Some(InteractionState::Select);
        self.applied = Some(state);
        StateReaction {
            color: self.palette.color_for(state),
            entered_select,
        }
    }

    /// Syncs to the source's current state without the select side effects.
    /// Used when the visualizer (re)subscribes.
    pub fn refresh(&mut self, state: InteractionState) -> Color {
        self.applied = Some(state);
        self.palette.color_for(state)
    }

    /// Replaces the normal color. Returns the color to repaint with when the
    /// surface is currently showing the normal state.
    pub fn set_normal_color(&mut self, color: Color) -> Option<Color> {
        self.palette.normal = color;
        (self.applied == Some(InteractionState::Normal)).then_some(color)
    }

    /// Starts the hide countdown, dropping any pending one.
    pub fn arm_notification(&mut self) {
        self.hide_timer = Some(Timer::new(self.notification_duration, TimerMode::Once));
    }

    /// Returns true on the tick the pending hide fires.
    pub fn tick_notification(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.hide_timer.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if timer.finished() {
            self.hide_timer = None;
            return true;
        }
        false
    }

    pub fn notification_pending(&self) -> bool {
        self.hide_timer.is_some()
    }

    pub fn palette(&self) -> &StatePalette {
        &self.palette
    }

    pub fn item_label(&self) -> Entity {
        self.item_label
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn notification_panel(&self) -> Entity {
        self.notification_panel
    }
}

#[derive(Debug)]
pub struct VisualizerBuilder {
    palette: StatePalette,
    item: Option<(Entity, String)>,
    notification_panel: Option<Entity>,
    notification_duration: Duration,
}

impl Default for VisualizerBuilder {
    fn default() -> Self {
        Self {
            palette: StatePalette::default(),
            item: None,
            notification_panel: None,
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }
}

impl VisualizerBuilder {
    pub fn palette(mut self, palette: StatePalette) -> Self {
        self.palette = palette;
        self
    }

    /// The label entity the tracker knows this item by, plus its display name.
    pub fn item(mut self, label: Entity, name: impl Into<String>) -> Self {
        self.item = Some((label, name.into()));
        self
    }

    pub fn notification_panel(mut self, panel: Entity) -> Self {
        self.notification_panel = Some(panel);
        self
    }

    pub fn notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    pub fn build(self) -> Result<InteractableVisualizer, SetupError> {
        let (item_label, item_name) = self.item.ok_or(SetupError::MissingCollaborator {
            owner: "InteractableVisualizer",
            field: "item_label",
        })?;
        let notification_panel =
            self.notification_panel
                .ok_or(SetupError::MissingCollaborator {
                    owner: "InteractableVisualizer",
                    field: "notification_panel",
                })?;

        Ok(InteractableVisualizer {
            palette: self.palette,
            item_label,
            item_name,
            notification_panel,
            notification_duration: self.notification_duration,
            applied: None,
            hide_timer: None,
        })
    }
}

/// Present while a visualizer consumes interaction events.
#[derive(Component, Debug, Default)]
pub struct Subscribed;

/// The camera all positioned UI is placed relative to.
#[derive(Component, Debug, Default)]
pub struct Viewer;

/// Text carried by a world-space panel or label.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct LabelText(pub String);

/// Screen-space text node that shows a panel's `LabelText` over the panel.
#[derive(Component, Debug, Clone, Copy)]
pub struct PanelCaption {
    pub panel: Entity,
    /// Caption box in logical pixels, centered on the panel.
    pub size: Vec2,
}
