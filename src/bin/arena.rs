//! Arena Binary
//!
//! Pits agents against each other on the reference games and tallies results.
//!
//! Example: arena rps uct random --matches 50
use clap::Parser;
use clap::ValueEnum;
use ludorum::*;
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(author, version, about = "Play agents against each other", long_about = None)]
struct Arena {
    #[arg(value_enum, help = "Game to play")]
    game: Title,
    #[arg(value_enum, required = true, help = "Agents, assigned to roles in order and cycled")]
    agents: Vec<Kind>,
    #[arg(long, default_value_t = 10)]
    matches: usize,
    #[arg(long, default_value_t = MINIMAX_HORIZON, help = "Depth of the minimax family")]
    horizon: usize,
    #[arg(long, default_value_t = UCT_SIMULATIONS, help = "Playouts per Monte Carlo or UCT decision")]
    simulations: usize,
    #[arg(long, default_value_t = 3, help = "Rounds of the dice game")]
    rounds: u8,
    #[arg(long, default_value_t = log::LevelFilter::Info)]
    log: log::LevelFilter,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Title {
    Rps,
    Dice,
    Guess,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Random,
    Heuristic,
    Minimax,
    Alphabeta,
    Maxn,
    Montecarlo,
    Uct,
}

impl Arena {
    fn player<G>(&self, kind: Kind) -> Box<dyn Player<G>>
    where
        G: Game,
    {
        match kind {
            Kind::Random => Box::new(RandomAgent::default()),
            Kind::Heuristic => Box::new(HeuristicAgent::new(Noise)),
            Kind::Minimax => Box::new(Minimax::new(Noise).horizon(self.horizon)),
            Kind::Alphabeta => Box::new(AlphaBeta::new(Noise).horizon(self.horizon)),
            Kind::Maxn => Box::new(MaxN::new(Noise).horizon(self.horizon)),
            Kind::Montecarlo => Box::new(MonteCarlo::new(Noise).simulations(self.simulations)),
            Kind::Uct => Box::new(Uct::new(Noise).simulations(self.simulations)),
        }
    }

    async fn tally<G>(&self, game: G) -> anyhow::Result<()>
    where
        G: Game,
    {
        let roles = game.roles();
        let kinds = roles
            .iter()
            .zip(self.agents.iter().cycle())
            .map(|(r, k)| (*r, *k))
            .collect::<BTreeMap<_, _>>();
        let mut totals = BTreeMap::<G::R, Utility>::new();
        let mut wins = BTreeMap::<G::R, usize>::new();
        for i in 0..self.matches {
            let players = kinds
                .iter()
                .map(|(r, k)| (*r, self.player::<G>(*k)))
                .collect::<Vec<_>>();
            let mut m = Match::new(game.clone(), players)?;
            let result = m.run().await?;
            log::debug!("[arena] match {} ({}) ended in {} plies", i, m.id(), m.ply());
            for (role, u) in result.iter() {
                *totals.entry(*role).or_default() += u;
            }
            let best = result.values().copied().fold(Utility::NEG_INFINITY, Utility::max);
            let winners = result.iter().filter(|(_, u)| **u == best).collect::<Vec<_>>();
            if let [(role, _)] = winners.as_slice() {
                *wins.entry(**role).or_default() += 1;
            }
        }
        for (role, kind) in kinds.iter() {
            log::info!(
                "[arena] {:<4} {:<12} wins {:>4}/{:<4} average {:+.3}",
                role,
                format!("{:?}", kind).to_lowercase(),
                wins.get(role).copied().unwrap_or_default(),
                self.matches,
                totals.get(role).copied().unwrap_or_default() / self.matches.max(1) as Utility
            );
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let arena = Arena::parse();
    ludorum::log(arena.log);
    match arena.game {
        Title::Rps => arena.tally(Rps::default()).await,
        Title::Dice => arena.tally(DiceBet::new(arena.rounds)).await,
        Title::Guess => arena.tally(Guess::hidden()).await,
    }
}
