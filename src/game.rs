/// A two-player, perfect-information board game the search engine can walk.
pub(crate) trait Game: Clone + std::fmt::Display {
    type Action: std::fmt::Debug + PartialEq + Eq + Clone + Copy;
    type Player: PartialEq + std::fmt::Debug + Clone + Copy;

    fn step(&mut self, action: Self::Action, player: Self::Player) -> anyhow::Result<()>;

    /// Legal actions in a fixed order; the engine breaks ties by this order.
    fn get_available_moves(&self) -> Vec<Self::Action>;

    fn opponent(player: Self::Player) -> Self::Player;

    /// No move left to make.
    fn done(&self) -> bool;

    fn check_winner(&self) -> Option<Self::Player>;
}
