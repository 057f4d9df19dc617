//! Layout-override cascade for scroll-driven parallax stories.
//!
//! A story is a list of sections, each with depth layers (`front`, `mid`,
//! `bg`, ...) holding positioned items. Authors tune placement in a
//! hand-edited override table keyed by section, then by item key. Entries
//! may inherit from another entry in the same section through `group` (or
//! the legacy `parent`), which lets a cluster of items move together.
//!
//! # Pipeline overview
//!
//! 1. **Key**: each item gets a raw key (declared key, media key, slug of
//!    `alt`, slug of the file stem) and a layered key
//!    `<section>-<layer>-<suffix>` ([`ItemKeys`]).
//! 2. **Chain**: the item's entry and its ancestors, ancestor first
//!    ([`collect_chain`]). Cycles and dangling references end the walk.
//! 3. **Merge**: fold the chain into one [`EffectiveConfig`]: `base*` values
//!    reset, `offset*` deltas accumulate, `hidden: true` sticks
//!    ([`merge_chain`]).
//! 4. **Place**: combine the merged override with the item's own `data-*`
//!    declarations into concrete style values ([`plan_story`]).
//!
//! Resolution never fails: anything missing or malformed degrades to "no
//! override". Only loading tables and storyboards returns [`LayoutError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod keys;
mod overrides;
mod story;

pub use foundation::error::{LayoutError, LayoutResult};
pub use foundation::value::{as_number, normalize_size, parse_number_prefix, pick_number};
pub use keys::derive::{
    DEFAULT_LAYER_LABEL, ItemKeys, UNKNOWN_ITEM_KEY, UNKNOWN_SECTION_KEY, compose_layered_key,
    layer_label, raw_item_key, section_key,
};
pub use keys::slug::slugify;
pub use overrides::chain::{Chain, ChainLink, collect_chain};
pub use overrides::entry::{
    ANIMATE, FULL_WIDTH, HEIGHT, NOTE, OverrideEntry, VisibilityDecl, WIDTH, Z_INDEX,
};
pub use overrides::merge::{EffectiveConfig, ResolvedVisibility, merge_chain, merge_entries};
pub use overrides::resolve::{KeySpace, ResolvedChain, resolve_chain, resolve_overrides};
pub use overrides::table::{META_KEY, OverrideTable, SectionMeta, SectionTable, TableIssue};
pub use story::layer::{DEFAULT_LAYER_SPEED, LayerPlan, PARALLAX_RANGE, layer_speed};
pub use story::model::{
    ItemData, ItemDescriptor, LayerDescriptor, MediaDescriptor, SectionDescriptor, Storyboard,
};
pub use story::placement::{
    ItemPlacement, ItemStyle, MediaSize, NO_ANIMATION, SectionLayout, SectionPlan, StoryPlan,
    place_item, plan_section, plan_story,
};
