use crate::game::{Board, Component, Dice, Game, GameInfo, LoadError, Rules};
use crate::ludeme::end::EndRule;
use crate::ludeme::meta::NoRepeat;
use crate::ludeme::MovesFn;
use crate::types::logging::{Event, EventLog};
use crate::types::*;

/// Assembles a `Game` and runs the load-time analysis.
#[derive(Debug)]
pub struct GameBuilder {
    pub name: String,
    pub num_players: u8,
    pub board: Board,
    pub dice: Option<Dice>,
    pub components: Vec<Component>,
    pub repetition: Option<RepetitionType>,
    pub teams: Vec<Vec<u8>>,
    pub rules: Rules,
    pub enable_log: bool,
}

impl GameBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            num_players: 2,
            board: Board::square(8),
            dice: None,
            components: vec![],
            repetition: None,
            teams: vec![],
            rules: Default::default(),
            enable_log: false,
        }
    }

    pub fn with_players(self, num_players: u8) -> Self {
        Self { num_players, ..self }
    }

    pub fn with_board(self, board: Board) -> Self {
        Self { board, ..self }
    }

    pub fn with_dice(self, count: u8, faces: u8) -> Self {
        Self {
            dice: Some(Dice { count, faces }),
            ..self
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_repetition(self, repetition: RepetitionType) -> Self {
        Self {
            repetition: Some(repetition),
            ..self
        }
    }

    /// Each entry lists the players of one team, numbered from 1 in order.
    pub fn with_teams(self, teams: Vec<Vec<u8>>) -> Self {
        Self { teams, ..self }
    }

    pub fn with_start(mut self, rule: MovesFn) -> Self {
        self.rules.start.push(rule);
        self
    }

    pub fn with_play(mut self, rule: MovesFn) -> Self {
        self.rules.play = Some(rule);
        self
    }

    pub fn with_end(mut self, rule: EndRule) -> Self {
        self.rules.end.push(rule);
        self
    }

    pub fn with_no_repeat(mut self, rule: NoRepeat) -> Self {
        self.rules.no_repeat = Some(rule);
        self
    }

    pub fn with_enable_log(self, enable_log: bool) -> Self {
        Self { enable_log, ..self }
    }

    fn validate_equipment(&self) -> Result<(), LoadError> {
        if self.num_players == 0 {
            return Err(LoadError::InvalidEquipment("a game needs at least one player".to_string()));
        }
        if self.board.num_sites() == 0 {
            return Err(LoadError::InvalidEquipment("the board has no sites".to_string()));
        }
        if let Some(dice) = self.dice {
            if dice.count == 0 || dice.faces == 0 {
                return Err(LoadError::InvalidEquipment(format!("invalid dice {dice:?}")));
            }
        }
        if self.teams.len() >= u8::MAX as usize {
            return Err(LoadError::InvalidEquipment("too many teams".to_string()));
        }
        let mut seen = vec![false; self.num_players as usize + 1];
        for &player in self.teams.iter().flatten() {
            match seen.get_mut(player as usize) {
                Some(joined) if player > 0 && !*joined => *joined = true,
                _ => {
                    return Err(LoadError::InvalidEquipment(format!(
                        "player {player} cannot join a team"
                    )))
                }
            }
        }
        if self.components.len() >= u16::MAX as usize {
            return Err(LoadError::InvalidEquipment("too many components".to_string()));
        }
        Ok(())
    }

    /// Builds the game, then runs the load-time passes in order: defaults, children, constant
    /// caching, flags and concepts, validation. The game is rejected if validation reports any
    /// error, with every diagnostic gathered.
    pub fn build(self) -> Result<Game, LoadError> {
        self.validate_equipment()?;
        let mut log = EventLog::new(self.enable_log);
        let info = GameInfo {
            name: self.name,
            num_players: self.num_players,
            board: self.board,
            dice: self.dice,
            components: self.components,
            repetition: self.repetition,
            teams: self.teams,
        };
        let mut game = Game {
            info,
            rules: self.rules,
            flags: GameFlags::empty(),
            concepts: Concepts::empty(),
            reads: ContextFields::empty(),
            writes: ContextFields::empty(),
            static_nodes: 0,
            report: Report::new(),
            log: EventLog::new(false),
        };

        let mut static_nodes = 0;
        for root in game.rules.roots() {
            static_nodes += root.preprocess(&game);
        }
        log.log(Event::Preprocessed { static_nodes });

        let mut flags = equipment_flags(&game.info);
        let mut concepts = equipment_concepts(&game.info);
        let mut reads = ContextFields::empty();
        let mut writes = ContextFields::empty();
        let mut report = Report::new();
        for root in game.rules.roots() {
            flags |= root.game_flags(&game);
            concepts |= root.concepts(&game);
            reads |= root.reads_eval_context_recursive();
            writes |= root.writes_eval_context_recursive();
            root.missing_requirement(&game, &mut report);
            root.will_crash(&game, &mut report);
        }
        for d in report.diagnostics() {
            log.log(Event::Diagnostic(d.clone()));
        }
        if report.has_errors() {
            return Err(LoadError::Rejected {
                name: game.info.name,
                diagnostics: report.into_diagnostics(),
            });
        }
        game.flags = flags;
        game.concepts = concepts;
        game.reads = reads;
        game.writes = writes;
        game.static_nodes = static_nodes;
        game.report = report;
        game.log = log;
        Ok(game)
    }
}

fn equipment_flags(info: &GameInfo) -> GameFlags {
    let mut flags = GameFlags::empty();
    if info.num_dice() > 0 {
        flags |= GameFlag::Stochastic;
    }
    if info.repetition.is_some() {
        flags |= GameFlag::RepetitionCheck;
    }
    if info.components.iter().any(|c| c.value != 0) {
        flags |= GameFlag::PieceValue;
    }
    if !info.teams.is_empty() {
        flags |= GameFlag::Team;
    }
    flags
}

fn equipment_concepts(info: &GameInfo) -> Concepts {
    let mut concepts = Concepts::only(Concept::Board);
    if info.board.site_type == SiteType::Cell {
        concepts |= Concept::SquareTiling;
    }
    if info.num_dice() > 0 {
        concepts |= Concept::Dice;
    }
    if !info.teams.is_empty() {
        concepts |= Concept::Team;
    }
    concepts
}
