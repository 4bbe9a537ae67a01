use std::fmt::{Display, Formatter};

use reelgate_model::{MediaKind, PlaybackRequest};

/// Season substituted when an episodic request does not name one.
pub const DEFAULT_SEASON: &str = "1";
/// Episode substituted when an episodic request does not name one.
pub const DEFAULT_EPISODE: &str = "1";

/// Substitution points recognised in provider templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Id,
    Season,
    Episode,
}

impl Placeholder {
    pub const ALL: [Placeholder; 3] =
        [Placeholder::Id, Placeholder::Season, Placeholder::Episode];

    /// Literal token as written in templates.
    pub const fn token(&self) -> &'static str {
        match self {
            Placeholder::Id => "{id}",
            Placeholder::Season => "{season}",
            Placeholder::Episode => "{episode}",
        }
    }

    /// Placeholders a template for `kind` is expected to carry.
    pub fn expected_for(kind: MediaKind) -> &'static [Placeholder] {
        match kind {
            MediaKind::Movie => &[Placeholder::Id],
            MediaKind::Tv => &Self::ALL,
        }
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Build the player URL for a request.
///
/// Every occurrence of each placeholder is replaced in a single left to right
/// pass, so substituted values are never scanned again. Values are inserted
/// verbatim: ids are not URL-encoded and the result is not validated.
pub fn resolve(request: &PlaybackRequest) -> String {
    let template = request.provider.template(request.kind);
    let id = (Placeholder::Id, request.content_id.as_str());

    if !request.is_episodic() {
        return substitute(template, &[id]);
    }

    let season = request.season.as_deref().unwrap_or(DEFAULT_SEASON);
    let episode = request.episode.as_deref().unwrap_or(DEFAULT_EPISODE);
    substitute(
        template,
        &[
            id,
            (Placeholder::Season, season),
            (Placeholder::Episode, episode),
        ],
    )
}

fn substitute(template: &str, values: &[(Placeholder, &str)]) -> String {
    let mut url = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        url.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(p, _)| tail.starts_with(p.token())) {
            Some((placeholder, value)) => {
                url.push_str(value);
                rest = &tail[placeholder.token().len()..];
            }
            None => {
                url.push('{');
                rest = &tail[1..];
            }
        }
    }
    url.push_str(rest);
    url
}

/// Placeholders present in a template, in [`Placeholder::ALL`] order.
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    Placeholder::ALL
        .into_iter()
        .filter(|p| template.contains(p.token()))
        .collect()
}

/// Placeholders a template for `kind` should carry but does not.
pub fn missing_placeholders(template: &str, kind: MediaKind) -> Vec<Placeholder> {
    Placeholder::expected_for(kind)
        .iter()
        .copied()
        .filter(|p| !template.contains(p.token()))
        .collect()
}
