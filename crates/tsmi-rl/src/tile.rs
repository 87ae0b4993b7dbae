//! Tile templates and tile instances.
//!
//! A [`TileSeed`] is an immutable template: glyph, passability and the
//! colour ranges a concrete tile is drawn from. Templates live in a
//! [`TileSet`], an arena addressed by [`TileId`]. Each time a level cell is
//! populated, a [`Tile`] is instantiated from a template with its day
//! colours picked at random inside the template's blend range. Night
//! colours are never copied: a tile keeps its template id and looks them up
//! in the set.

use rand::Rng;
use tsmi_core::Color;

use crate::error::{Error, Result};

/// Handle of a template inside a [`TileSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub u16);

impl TileId {
    /// The reserved "no data" template.
    pub const NULL: TileId = TileId(0);

    pub const fn value(self) -> u16 {
        self.0
    }
}

/// Input description of a new template. Everything but the id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpec {
    pub glyph: char,
    pub solid: bool,
    pub opaque: bool,
    pub day: [Color; 2],
    pub night: Color,
    pub day_visible: [Color; 2],
    pub night_visible: Color,
    pub blend_min: f32,
    pub blend_max: f32,
}

impl TileSpec {
    /// A passable, transparent, black template drawn with `glyph`.
    pub const fn new(glyph: char) -> Self {
        Self {
            glyph,
            solid: false,
            opaque: false,
            day: [Color::BLACK; 2],
            night: Color::BLACK,
            day_visible: [Color::BLACK; 2],
            night_visible: Color::BLACK,
            blend_min: 0.0,
            blend_max: 0.0,
        }
    }

    pub const fn solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub const fn opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    /// Day colour range remembered outside the field of view.
    pub const fn day(mut self, a: Color, b: Color) -> Self {
        self.day = [a, b];
        self
    }

    pub const fn night(mut self, c: Color) -> Self {
        self.night = c;
        self
    }

    /// Day colour range while in the field of view.
    pub const fn day_visible(mut self, a: Color, b: Color) -> Self {
        self.day_visible = [a, b];
        self
    }

    pub const fn night_visible(mut self, c: Color) -> Self {
        self.night_visible = c;
        self
    }

    /// Range of the blend coefficient drawn per instance.
    pub const fn blend(mut self, min: f32, max: f32) -> Self {
        self.blend_min = min;
        self.blend_max = max;
        self
    }
}

/// An immutable tile template registered in a [`TileSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct TileSeed {
    id: TileId,
    spec: TileSpec,
}

impl TileSeed {
    /// The null template: id 0, `'?'`, solid, opaque, black.
    pub const NULL: TileSeed = TileSeed {
        id: TileId::NULL,
        spec: TileSpec::new('?').solid(true).opaque(true),
    };

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn glyph(&self) -> char {
        self.spec.glyph
    }

    pub fn solid(&self) -> bool {
        self.spec.solid
    }

    pub fn opaque(&self) -> bool {
        self.spec.opaque
    }

    pub fn night(&self) -> Color {
        self.spec.night
    }

    pub fn night_visible(&self) -> Color {
        self.spec.night_visible
    }

    pub fn spec(&self) -> &TileSpec {
        &self.spec
    }

    fn blend<R: Rng>(&self, [a, b]: [Color; 2], rng: &mut R) -> Color {
        let (min, max) = (self.spec.blend_min, self.spec.blend_max);
        let t = if min < max {
            rng.random_range(min..=max)
        } else {
            min
        };
        Color::lerp(a, b, f64::from(t))
    }
}

/// Arena of tile templates. Slot 0 always holds [`TileSeed::NULL`].
#[derive(Debug, Clone)]
pub struct TileSet {
    seeds: Vec<TileSeed>,
}

impl Default for TileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSet {
    /// A set holding only the null template.
    pub fn new() -> Self {
        Self {
            seeds: vec![TileSeed::NULL],
        }
    }

    /// Register a template and return its id. Ids are handed out
    /// sequentially starting at 1; once every `u16` id is taken the set
    /// refuses new templates with [`Error::TooManyTemplates`].
    pub fn create(&mut self, spec: TileSpec) -> Result<TileId> {
        let (min, max) = (spec.blend_min, spec.blend_max);
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            return Err(Error::InvalidBlendRange { min, max });
        }
        let id = u16::try_from(self.seeds.len())
            .map(TileId)
            .map_err(|_| Error::TooManyTemplates {
                max: usize::from(u16::MAX),
            })?;
        self.seeds.push(TileSeed { id, spec });
        Ok(id)
    }

    /// The template for `id`; unknown ids resolve to the null template.
    pub fn get(&self, id: TileId) -> &TileSeed {
        self.seeds
            .get(id.0 as usize)
            .unwrap_or(&self.seeds[TileId::NULL.0 as usize])
    }

    pub fn null(&self) -> &TileSeed {
        &self.seeds[0]
    }

    /// Number of templates, the null template included.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Always false: the null template is always present.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileSeed> + '_ {
        self.seeds.iter()
    }
}

/// A concrete tile stored in a level cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileId,
    pub glyph: char,
    pub solid: bool,
    pub opaque: bool,
    /// Day colour outside the field of view.
    pub day: Color,
    /// Day colour inside the field of view.
    pub day_visible: Color,
    /// Fog-of-war memory: set once the tile has been in view.
    pub seen: bool,
    /// Reserved; the engine never sets it.
    pub lit: bool,
}

impl Tile {
    /// Instantiate a tile from `seed`, drawing the day colour and then the
    /// visible day colour from the template's blend range.
    pub fn instantiate<R: Rng>(seed: &TileSeed, rng: &mut R) -> Self {
        let day = seed.blend(seed.spec.day, rng);
        let day_visible = seed.blend(seed.spec.day_visible, rng);
        Self {
            kind: seed.id,
            glyph: seed.spec.glyph,
            solid: seed.spec.solid,
            opaque: seed.spec.opaque,
            day,
            day_visible,
            seen: false,
            lit: false,
        }
    }

    /// The null tile. Its template is black at every coefficient, so no
    /// random draw is needed.
    pub const fn null() -> Self {
        Self {
            kind: TileId::NULL,
            glyph: TileSeed::NULL.spec.glyph,
            solid: true,
            opaque: true,
            day: Color::BLACK,
            day_visible: Color::BLACK,
            seen: false,
            lit: false,
        }
    }

    pub fn is(&self, kind: TileId) -> bool {
        self.kind == kind
    }

    pub fn night(&self, tiles: &TileSet) -> Color {
        tiles.get(self.kind).night()
    }

    pub fn night_visible(&self, tiles: &TileSet) -> Color {
        tiles.get(self.kind).night_visible()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const GREEN: Color = Color::from_rgb(0, 200, 0);
    const DARK_GREEN: Color = Color::from_rgb(0, 100, 0);

    fn grass() -> TileSpec {
        TileSpec::new('.')
            .day(DARK_GREEN, GREEN)
            .night(Color::from_rgb(0, 20, 0))
            .day_visible(GREEN, Color::WHITE)
            .night_visible(Color::from_rgb(0, 60, 0))
            .blend(0.2, 0.8)
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut set = TileSet::new();
        assert_eq!(set.len(), 1);
        let a = set.create(grass()).unwrap();
        let b = set.create(TileSpec::new('#').solid(true)).unwrap();
        assert_eq!(a, TileId(1));
        assert_eq!(b, TileId(2));
        assert_eq!(set.get(b).glyph(), '#');
        assert!(set.get(b).solid());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn full_set_refuses_new_templates() {
        let mut set = TileSet::new();
        let mut last = TileId::NULL;
        for _ in 0..u16::MAX {
            last = set.create(TileSpec::new('.')).unwrap();
        }
        assert_eq!(last, TileId(u16::MAX));
        assert_eq!(set.len(), 65536);
        let res = set.create(TileSpec::new('x'));
        assert_eq!(res, Err(Error::TooManyTemplates { max: 65535 }));
        assert_eq!(set.len(), 65536);
        assert_eq!(set.get(TileId::NULL).glyph(), TileSeed::NULL.glyph());
    }

    #[test]
    fn separate_sets_count_independently() {
        let mut s1 = TileSet::new();
        let mut s2 = TileSet::new();
        s1.create(grass()).unwrap();
        assert_eq!(s2.create(grass()).unwrap(), TileId(1));
    }

    #[test]
    fn invalid_blend_range_rejected() {
        let mut set = TileSet::new();
        assert_eq!(
            set.create(grass().blend(0.9, 0.1)),
            Err(Error::InvalidBlendRange { min: 0.9, max: 0.1 })
        );
        assert!(set.create(grass().blend(-0.1, 0.5)).is_err());
        assert!(set.create(grass().blend(0.0, 1.5)).is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unknown_id_resolves_to_null() {
        let set = TileSet::new();
        assert_eq!(set.get(TileId(99)).id(), TileId::NULL);
        assert_eq!(set.get(TileId::NULL), &TileSeed::NULL);
    }

    #[test]
    fn instantiate_blends_inside_range() {
        let mut set = TileSet::new();
        let id = set.create(grass()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let t = Tile::instantiate(set.get(id), &mut rng);
            assert_eq!(t.kind, id);
            assert_eq!(t.glyph, '.');
            assert!(!t.seen);
            // green channel of day = 100 + 100 * t, t in [0.2, 0.8]
            assert!((120..=180).contains(&t.day.g()), "day {:?}", t.day);
            assert_eq!(t.day.r(), 0);
            assert_eq!(t.night(&set), Color::from_rgb(0, 20, 0));
            assert_eq!(t.night_visible(&set), Color::from_rgb(0, 60, 0));
        }
    }

    #[test]
    fn fixed_blend_draws_nothing() {
        let seed = TileSeed {
            id: TileId(1),
            spec: grass().blend(0.5, 0.5),
        };
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        let t = Tile::instantiate(&seed, &mut a);
        assert_eq!(t.day, Color::lerp(DARK_GREEN, GREEN, 0.5));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn null_tile_matches_null_template() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = Tile::instantiate(&TileSeed::NULL, &mut rng);
        assert_eq!(t, Tile::null());
        assert!(t.solid && t.opaque);
        assert_eq!(t.glyph, '?');
    }
}
