//! Template dispatcher.
//!
//! Turns a decision, its metadata and the fetched entity into a
//! [`RenderInstruction`]: an ordered block tree that presentation code
//! walks. No markup is produced here.

use crate::domain::model::{
    BackLink, ContentEntity, Cta, PageMetadata, RouteDecision, SocialLink, TemplateFamily,
};
use serde::Serialize;

pub const NOT_FOUND_TITLE: &str = "404 Page not found";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading pages.";
pub const HOME_SPEAKER_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    List,
    Detail,
    Default,
    NotFound,
    Error,
}

impl From<TemplateFamily> for SectionKind {
    fn from(template: TemplateFamily) -> Self {
        match template {
            TemplateFamily::List => SectionKind::List,
            TemplateFamily::Detail => SectionKind::Detail,
            TemplateFamily::Default => SectionKind::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    Full,
    Narrow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: Option<String>,
    pub lead: Option<String>,
    pub ctas: Option<Vec<Cta>>,
    pub template: Option<TemplateFamily>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Markdown {
    pub source: String,
    /// Parse as block-level content even when the source is a single line.
    pub force_block: bool,
    pub width: ColumnWidth,
}

/// Blocks rendered by the list widgets; they fetch their own data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget", rename_all = "kebab-case")]
pub enum Widget {
    VenueTeaser { is_venue: bool },
    NewsList,
    NewsSummary,
    HotelsList,
    RestaurantsList,
    Sponsors { detailed: bool },
    SpeakersList { limit: Option<usize>, with_heading: bool },
    Jobs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "kebab-case")]
pub enum Block {
    HeroBackground,
    Hero(Hero),
    Markdown(Markdown),
    /// Always present on detail pages, empty when there is nowhere to go back to.
    Backlink { link: Option<BackLink> },
    Column { width: ColumnWidth, blocks: Vec<Block> },
    SpeakerColumns { profile: Vec<Block>, about: Vec<Block> },
    Title { text: String, subtitle: Option<String> },
    Heading { text: String },
    Lead { text: String },
    SpeakerImage { url: Option<String>, alt: String },
    SpeakerSocials { links: Vec<SocialLink> },
    Widget(Widget),
    /// Full-bleed band below the main column.
    Band { blocks: Vec<Block> },
    ErrorMessage { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderInstruction {
    pub kind: SectionKind,
    pub loading: bool,
    pub blocks: Vec<Block>,
}

impl RenderInstruction {
    pub fn not_found() -> Self {
        Self {
            kind: SectionKind::NotFound,
            loading: false,
            blocks: vec![Block::Hero(Hero {
                title: NOT_FOUND_TITLE.to_string(),
                subtitle: None,
                lead: None,
                ctas: None,
                template: None,
            })],
        }
    }

    pub fn load_error() -> Self {
        Self {
            kind: SectionKind::Error,
            loading: false,
            blocks: vec![Block::ErrorMessage {
                message: LOAD_ERROR_MESSAGE.to_string(),
            }],
        }
    }

    /// Template skeleton shown while the entity is in flight.
    pub fn loading(template: TemplateFamily) -> Self {
        let blocks = match template {
            TemplateFamily::List | TemplateFamily::Default => vec![Block::HeroBackground],
            TemplateFamily::Detail => vec![Block::Backlink { link: None }],
        };
        Self {
            kind: template.into(),
            loading: true,
            blocks,
        }
    }

    /// Widgets in render order, including nested ones.
    pub fn widgets(&self) -> Vec<&Widget> {
        fn walk<'a>(blocks: &'a [Block], out: &mut Vec<&'a Widget>) {
            for block in blocks {
                match block {
                    Block::Widget(w) => out.push(w),
                    Block::Column { blocks, .. } | Block::Band { blocks } => walk(blocks, out),
                    Block::SpeakerColumns { profile, about } => {
                        walk(profile, out);
                        walk(about, out);
                    }
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.blocks, &mut out);
        out
    }
}

pub fn dispatch(decision: &RouteDecision, metadata: &PageMetadata, entity: &ContentEntity) -> RenderInstruction {
    let blocks = match decision.template {
        TemplateFamily::List => render_list(decision, metadata, entity),
        TemplateFamily::Detail => render_detail(decision, metadata, entity),
        TemplateFamily::Default => render_default(decision, metadata, entity),
    };

    RenderInstruction {
        kind: decision.template.into(),
        loading: false,
        blocks,
    }
}

fn hero(metadata: &PageMetadata, entity: &ContentEntity, template: Option<TemplateFamily>) -> Block {
    Block::Hero(Hero {
        title: metadata.title.clone(),
        subtitle: metadata.subtitle.clone(),
        lead: entity.lead.clone(),
        ctas: metadata.ctas.clone(),
        template,
    })
}

fn markdown(entity: &ContentEntity, width: ColumnWidth) -> Option<Block> {
    entity.body_markdown().map(|source| {
        Block::Markdown(Markdown {
            source: source.to_string(),
            force_block: true,
            width,
        })
    })
}

fn sponsors_band(entity: &ContentEntity) -> Option<Block> {
    entity.flags.show_sponsors.then(|| Block::Band {
        blocks: vec![Block::Widget(Widget::Sponsors { detailed: false })],
    })
}

fn render_list(decision: &RouteDecision, metadata: &PageMetadata, entity: &ContentEntity) -> Vec<Block> {
    let flags = &entity.flags;
    let body_width = if decision.wide_content {
        ColumnWidth::Full
    } else {
        ColumnWidth::Narrow
    };

    let mut main = Vec::new();
    main.extend(markdown(entity, body_width));
    let widgets = [
        (flags.show_venue, Widget::VenueTeaser { is_venue: decision.is_venue }),
        (flags.show_news, Widget::NewsList),
        (flags.show_hotels, Widget::HotelsList),
        (flags.show_restaurants, Widget::RestaurantsList),
        (flags.show_sponsors_detailed, Widget::Sponsors { detailed: true }),
    ];
    main.extend(gated(widgets));

    let mut blocks = vec![
        Block::HeroBackground,
        hero(metadata, entity, Some(TemplateFamily::List)),
        Block::Column {
            width: ColumnWidth::Full,
            blocks: main,
        },
    ];
    blocks.extend(sponsors_band(entity));
    blocks
}

fn render_detail(decision: &RouteDecision, metadata: &PageMetadata, entity: &ContentEntity) -> Vec<Block> {
    let mut blocks = vec![
        hero(metadata, entity, Some(TemplateFamily::Detail)),
        Block::Backlink {
            link: decision.back_link.clone(),
        },
    ];

    if decision.is_speaker_detail {
        blocks.push(speaker_columns(entity));
    } else {
        let mut column = vec![Block::Title {
            text: entity.title.clone(),
            subtitle: None,
        }];
        if let Some(lead) = &entity.lead {
            column.push(Block::Lead { text: lead.clone() });
        }
        column.extend(markdown(entity, ColumnWidth::Narrow));
        blocks.push(Block::Column {
            width: ColumnWidth::Narrow,
            blocks: column,
        });
    }

    blocks
}

fn speaker_columns(entity: &ContentEntity) -> Block {
    let profile = vec![
        Block::Title {
            text: entity.title.clone(),
            subtitle: entity.lead.clone(),
        },
        Block::SpeakerImage {
            url: entity.photo_url().map(str::to_string),
            alt: entity.title.clone(),
        },
        Block::SpeakerSocials {
            links: entity.social_links(),
        },
    ];

    let mut about = vec![Block::Heading {
        text: "About".to_string(),
    }];
    about.extend(markdown(entity, ColumnWidth::Full));

    Block::SpeakerColumns { profile, about }
}

fn render_default(decision: &RouteDecision, metadata: &PageMetadata, entity: &ContentEntity) -> Vec<Block> {
    let flags = &entity.flags;
    let speakers = if decision.is_home {
        Widget::SpeakersList {
            limit: Some(HOME_SPEAKER_LIMIT),
            with_heading: true,
        }
    } else {
        Widget::SpeakersList {
            limit: None,
            with_heading: false,
        }
    };

    let mut main = Vec::new();
    main.extend(markdown(entity, ColumnWidth::Full));
    let widgets = [
        (flags.show_news, Widget::NewsSummary),
        (flags.show_speakers || decision.is_home, speakers),
        (flags.show_venue, Widget::VenueTeaser { is_venue: decision.is_venue }),
        (flags.show_jobs, Widget::Jobs),
    ];
    main.extend(gated(widgets));

    let mut blocks = vec![
        Block::HeroBackground,
        hero(metadata, entity, None),
        Block::Column {
            width: ColumnWidth::Full,
            blocks: main,
        },
    ];
    blocks.extend(sponsors_band(entity));
    blocks
}

fn gated<const N: usize>(widgets: [(bool, Widget); N]) -> impl Iterator<Item = Block> {
    widgets
        .into_iter()
        .filter_map(|(shown, widget)| shown.then_some(Block::Widget(widget)))
}
