//! Terminal rendering of battle feedback.
//!
//! [`TerminalPresentation`] implements the runtime's presentation sink by
//! printing styled lines; the free functions build the plain-text status and
//! spell tables shown before each player decision.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::style::{StyledContent, Stylize};
use game_core::{BattleAction, BattleSession, CombatantId, DamageType, Emotion, Side};
use runtime::{
    Completion, EffectRequest, NumberPopup, PopupKind, PresentationSink, VisualEffect,
};

/// Prints effects and popups as they happen.
pub struct TerminalPresentation {
    names: HashMap<CombatantId, String>,
    effect_delay: Duration,
}

impl TerminalPresentation {
    pub fn new(session: &BattleSession, effect_delay: Duration) -> Self {
        let names = session
            .combatants()
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();
        Self {
            names,
            effect_delay,
        }
    }

    fn name(&self, id: CombatantId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    fn effect_line(&self, request: &EffectRequest) -> StyledContent<String> {
        let target = self.name(request.target);
        match request.effect {
            VisualEffect::Slash => format!("  ⚔ {target} is struck").white(),
            VisualEffect::Element(kind) => element_style(kind, format!("  ✷ {kind:?} engulfs {target}")),
            VisualEffect::HealSparkle => format!("  ✚ light gathers around {target}").green(),
            VisualEffect::BuffAura => format!("  ▲ {target} glows with strength").cyan(),
            VisualEffect::DebuffAura => format!("  ▼ a shadow settles on {target}").dark_magenta(),
            VisualEffect::EmotionBurst => format!("  ✦ {target}'s feelings stir").yellow(),
            VisualEffect::RestGlow => format!("  … {target} catches their breath").dark_grey(),
            VisualEffect::Miss => format!("  ↷ {target} dodges!").dark_grey().italic(),
        }
    }
}

impl PresentationSink for TerminalPresentation {
    fn play_effect(&self, request: EffectRequest) -> Completion {
        println!("{}", self.effect_line(&request));

        if self.effect_delay.is_zero() {
            return Completion::ready();
        }
        let (signal, completion) = Completion::pending();
        let delay = self
            .effect_delay
            .min(Duration::from_millis(u64::from(request.duration_hint_ms)));
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            signal.complete();
        });
        completion
    }

    fn play_looping(&self, emotion: Emotion, owner: CombatantId) {
        let line = format!("  {} is overcome with {}", self.name(owner), emotion);
        println!("{}", emotion_style(emotion, line).bold());
    }

    fn stop_looping(&self, owner: CombatantId) {
        println!("{}", format!("  {} calms down", self.name(owner)).dark_grey());
    }

    fn show_popup(&self, popup: NumberPopup) {
        let target = self.name(popup.target);
        let line = match popup.kind {
            PopupKind::Damage { critical } => {
                let text = format!("    {target} -{} HP{}", popup.value, crit_suffix(critical));
                if critical { text.red().bold() } else { text.red() }
            }
            PopupKind::Heal { critical } => {
                let text = format!("    {target} +{} HP{}", popup.value, crit_suffix(critical));
                if critical { text.green().bold() } else { text.green() }
            }
            PopupKind::Willpower => format!("    {target} {:+} WP", popup.value).blue(),
        };
        println!("{line}");
    }

    fn announce_action(&self, session: &BattleSession, actor: CombatantId, action: &BattleAction) {
        println!("{}", describe_action(session, actor, action).bold());
    }
}

fn crit_suffix(critical: bool) -> &'static str {
    if critical { " (critical!)" } else { "" }
}

fn element_style(kind: DamageType, text: String) -> StyledContent<String> {
    match kind {
        DamageType::Fire => text.red(),
        DamageType::Ice => text.cyan(),
        DamageType::Curse => text.magenta(),
        DamageType::Poison => text.dark_green(),
        DamageType::Physical => text.white(),
    }
}

fn emotion_style(emotion: Emotion, text: String) -> StyledContent<String> {
    match emotion {
        Emotion::None => text.white(),
        Emotion::Happiness => text.yellow(),
        Emotion::Anger => text.red(),
        Emotion::Sadness => text.blue(),
        Emotion::Fear => text.dark_magenta(),
        Emotion::Disgust => text.dark_green(),
    }
}

/// Display name for a combatant, falling back to its id.
pub fn combatant_name(session: &BattleSession, id: CombatantId) -> String {
    session
        .combatant(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// One sentence describing an accepted action.
pub fn describe_action(session: &BattleSession, actor: CombatantId, action: &BattleAction) -> String {
    let actor = combatant_name(session, actor);
    match action {
        BattleAction::Attack { target } => {
            format!("{actor} attacks {}", combatant_name(session, *target))
        }
        BattleAction::Cast { spell, targets } => {
            let targets: Vec<String> = targets
                .iter()
                .map(|t| combatant_name(session, *t))
                .collect();
            format!("{actor} casts {spell} on {}", targets.join(", "))
        }
        BattleAction::Rest => format!("{actor} rests"),
    }
}

/// The battlefield, one combatant per line, numbered the way the input
/// parser expects targets.
pub fn status_lines(session: &BattleSession) -> Vec<String> {
    let mut lines = Vec::with_capacity(session.combatants().len() + 2);
    for side in [Side::Ally, Side::Enemy] {
        lines.push(match side {
            Side::Ally => "Allies".to_string(),
            Side::Enemy => "Enemies".to_string(),
        });
        for c in session.combatants().iter().filter(|c| c.side == side) {
            let marker = if session.current() == Some(c.id) { ">" } else { " " };
            let state = if !c.alive {
                "down".to_string()
            } else {
                match c.current_emotion() {
                    Emotion::None => String::new(),
                    emotion => emotion.to_string(),
                }
            };
            lines.push(
                format!(
                    "{marker}{:>2}. {:<18} HP {:>3}/{:<3} WP {:>3}/{:<3} {}",
                    c.id.0 + 1,
                    c.name,
                    c.health.current,
                    c.health.maximum,
                    c.willpower.current,
                    c.willpower.maximum,
                    state,
                )
                .trim_end()
                .to_string(),
            );
        }
    }
    lines
}

/// Spells `actor` knows, with the willpower they would cost right now.
pub fn spell_menu(session: &BattleSession, actor: CombatantId) -> Vec<String> {
    let Some(me) = session.combatant(actor) else {
        return Vec::new();
    };
    me.known_spells
        .iter()
        .filter_map(|name| session.spells().get(name))
        .map(|spell| {
            let cost = session.spell_cost(actor, spell).unwrap_or(spell.cost);
            let affordable = if cost <= me.willpower.current { " " } else { "x" };
            format!(
                "{affordable} {:<16} {:>2} WP  {:<8} {}",
                spell.name,
                cost,
                if spell.is_multi_target() { "all" } else { "single" },
                spell.description,
            )
            .trim_end()
            .to_string()
        })
        .collect()
}
