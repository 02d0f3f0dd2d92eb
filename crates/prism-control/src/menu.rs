// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The main-menu state machine.

use prism_core::platform::{InputSnapshot, Key};

/// The three menu entries, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuSelection {
    /// Enter the scene.
    #[default]
    Start,
    /// Quit the application.
    Exit,
    /// Open the tutorial video.
    PlayVideo,
}

impl MenuSelection {
    /// Entries in on-screen order.
    pub const ALL: [MenuSelection; 3] = [Self::Start, Self::Exit, Self::PlayVideo];

    /// Label shown in the menu.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Exit => "Exit",
            Self::PlayVideo => "Play Tutorial Video",
        }
    }

    /// The entry to the right, staying on the last one.
    pub const fn next(self) -> Self {
        match self {
            Self::Start => Self::Exit,
            Self::Exit | Self::PlayVideo => Self::PlayVideo,
        }
    }

    /// The entry to the left, staying on the first one.
    pub const fn previous(self) -> Self {
        match self {
            Self::Start | Self::Exit => Self::Start,
            Self::PlayVideo => Self::Exit,
        }
    }
}

/// What confirming or leaving the menu asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Enter the scene with the canonical defaults.
    Start,
    /// Quit the application.
    Exit,
    /// Open the tutorial video and stay in the menu.
    PlayVideo,
}

/// The menu cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MainMenu {
    selection: MenuSelection,
}

impl MainMenu {
    /// The highlighted entry.
    pub fn selection(&self) -> MenuSelection {
        self.selection
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        self.selection = self.selection.next();
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.selection = self.selection.previous();
    }

    /// Returns the action of the highlighted entry.
    pub fn confirm(&self) -> MenuAction {
        match self.selection {
            MenuSelection::Start => MenuAction::Start,
            MenuSelection::Exit => MenuAction::Exit,
            MenuSelection::PlayVideo => MenuAction::PlayVideo,
        }
    }

    /// Processes one frame of menu input.
    ///
    /// Left and right move the cursor, Enter confirms and Escape quits.
    pub fn handle_input(&mut self, input: &InputSnapshot) -> Option<MenuAction> {
        if input.just_pressed(Key::ArrowLeft) {
            self.move_left();
        }
        if input.just_pressed(Key::ArrowRight) {
            self.move_right();
        }
        if input.just_pressed(Key::Escape) {
            return Some(MenuAction::Exit);
        }
        if input.just_pressed(Key::Enter) {
            return Some(self.confirm());
        }
        None
    }
}
