use serde::Deserialize;

/// Which collisions end a session
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Rules {
    /// What happens when the snake's head reaches the edge of the grid
    pub(crate) walls: Walls,

    /// Whether running the head into the snake's own body ends the session
    pub(crate) self_collision: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Walls {
    /// The head reappears at the opposite edge
    #[default]
    Wrap,
    /// The head stays put on the blocked axis
    Clamp,
    /// The session ends
    Die,
}
