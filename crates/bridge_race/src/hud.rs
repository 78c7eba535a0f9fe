//! Score counters and the win banner

use crate::color::BlockColor;
use race_engine::ui::{Anchor, UiManager, UiNodeId, UiText};

/// Who reached the goal first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// The human player
    Player,
    /// The bot
    Bot,
}

impl Winner {
    /// Banner text announcing this winner
    pub fn banner_text(self) -> &'static str {
        match self {
            Winner::Player => "YOU WIN!",
            Winner::Bot => "BOT WINS!",
        }
    }
}

/// On-screen race HUD
#[derive(Debug)]
pub struct Hud {
    player_counter: UiNodeId,
    bot_counter: UiNodeId,
    banner: Option<UiNodeId>,
}

impl Hud {
    /// Add the two counters to the UI
    pub fn new(ui: &mut UiManager) -> Self {
        let player_counter = ui.add_text(
            UiText::new(counter_text(Winner::Player, 0), Anchor::TopLeft, (0.03, 0.05))
                .with_color(BlockColor::Azure.color()),
        );
        let bot_counter = ui.add_text(
            UiText::new(counter_text(Winner::Bot, 0), Anchor::TopRight, (-0.03, 0.05))
                .with_color(BlockColor::Red.color()),
        );
        Self {
            player_counter,
            bot_counter,
            banner: None,
        }
    }

    /// Refresh both counters
    pub fn update_counters(&self, ui: &mut UiManager, player_blocks: u32, bot_blocks: u32) {
        ui.set_text(self.player_counter, counter_text(Winner::Player, player_blocks));
        ui.set_text(self.bot_counter, counter_text(Winner::Bot, bot_blocks));
    }

    /// Show the banner; only the first call has any effect
    pub fn show_banner(&mut self, ui: &mut UiManager, winner: Winner) {
        if self.banner.is_some() {
            return;
        }
        self.banner = Some(ui.add_text(
            UiText::new(winner.banner_text(), Anchor::Center, (0.0, 0.0)).with_scale(2.0),
        ));
    }

    /// Text of the banner, if shown
    pub fn banner<'a>(&self, ui: &'a UiManager) -> Option<&'a str> {
        self.banner
            .and_then(|id| ui.get_text(id))
            .map(|node| node.text.as_str())
    }

    /// Counter lines as currently displayed
    pub fn counters<'a>(&self, ui: &'a UiManager) -> (Option<&'a str>, Option<&'a str>) {
        (
            ui.get_text(self.player_counter).map(|node| node.text.as_str()),
            ui.get_text(self.bot_counter).map(|node| node.text.as_str()),
        )
    }

    /// Remove every HUD element
    pub fn remove(self, ui: &mut UiManager) {
        ui.remove(self.player_counter);
        ui.remove(self.bot_counter);
        if let Some(banner) = self.banner {
            ui.remove(banner);
        }
    }
}

fn counter_text(who: Winner, blocks: u32) -> String {
    match who {
        Winner::Player => format!("You: {blocks}"),
        Winner::Bot => format!("Bot: {blocks}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_follow_inventories() {
        let mut ui = UiManager::new();
        let hud = Hud::new(&mut ui);
        assert_eq!(hud.counters(&ui), (Some("You: 0"), Some("Bot: 0")));

        hud.update_counters(&mut ui, 4, 7);
        assert_eq!(hud.counters(&ui), (Some("You: 4"), Some("Bot: 7")));
    }

    #[test]
    fn test_banner_is_one_shot() {
        let mut ui = UiManager::new();
        let mut hud = Hud::new(&mut ui);
        hud.show_banner(&mut ui, Winner::Player);
        hud.show_banner(&mut ui, Winner::Bot);

        assert_eq!(hud.banner(&ui), Some("YOU WIN!"));
        assert_eq!(ui.visible_texts().count(), 3);

        hud.remove(&mut ui);
        assert_eq!(ui.visible_texts().count(), 0);
    }
}
