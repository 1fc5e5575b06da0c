//! Response shapes of the catalog REST service.
//!
//! Only the fields the engine consumes are declared; unknown fields are ignored.
//! A missing required field fails decoding as a whole.

use serde::Deserialize;

use crate::domain::{id_from_url, DomainError, EntryDetail, LineageNode, Stat};

#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

/// `GET /pokemon?limit=L&offset=O`
#[derive(Debug, Clone, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<NamedRef>,
}

/// `GET /pokemon/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatSlot>,
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedRef,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl From<DetailResponse> for EntryDetail {
    fn from(raw: DetailResponse) -> Self {
        let artwork_url = raw
            .sprites
            .other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default);
        Self {
            id: raw.id,
            name: raw.name,
            height_dm: raw.height,
            weight_hg: raw.weight,
            types: raw.types.into_iter().map(|t| t.kind.name).collect(),
            stats: raw
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    base: s.base_stat,
                })
                .collect(),
            abilities: raw.abilities.into_iter().map(|a| a.ability.name).collect(),
            artwork_url,
        }
    }
}

/// `GET /pokemon-species/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesResponse {
    #[serde(default)]
    pub evolution_chain: Option<UrlRef>,
}

/// `GET /evolution-chain/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChainResponse {
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    pub species: NamedRef,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl TryFrom<&ChainLink> for LineageNode {
    type Error = DomainError;

    fn try_from(link: &ChainLink) -> Result<Self, Self::Error> {
        let children = link
            .evolves_to
            .iter()
            .map(LineageNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LineageNode {
            species_id: id_from_url(&link.species.url)?,
            species_name: link.species.name.clone(),
            children,
        })
    }
}
