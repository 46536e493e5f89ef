// SPDX-License-Identifier: MPL-2.0
//! Property groups of the detail sidebar.
//!
//! [`compose`] decides which groups exist and what they hold; [`view`] turns
//! them into widgets. Groups come in a fixed order: generalities, file or
//! directory, image, and navigation. Only navigation is always present.

use super::state::{Message, ViewInputs};
use crate::domain::ContentKind;
use crate::i18n::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{button, container, rule, scrollable, Column, Row, Text};
use iced::{Element, Length};
use reqwest::Url;

const TITLE_ATTR: &str = "title";
const DESCRIPTION_ATTR: &str = "description";

/// One titled group of properties.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarGroup {
    /// User-assigned attributes; only when a permanode is known.
    General {
        title: Option<String>,
        description: Option<String>,
    },
    /// Filesystem attributes of a file or directory. Directories have no size.
    Fileish {
        kind: ContentKind,
        file_name: Option<String>,
        size: Option<u64>,
    },
    Image {
        width: u32,
        height: u32,
        mime_type: Option<String>,
    },
    Navigation { search_url: Url, legacy_url: Url },
}

/// Builds the ordered group list for `inputs`.
#[must_use]
pub fn compose(inputs: &ViewInputs) -> Vec<SidebarGroup> {
    let mut groups = Vec::with_capacity(4);

    if let Some(permanode) = &inputs.permanode {
        groups.push(SidebarGroup::General {
            title: permanode.single_attr(TITLE_ATTR).map(str::to_string),
            description: permanode.single_attr(DESCRIPTION_ATTR).map(str::to_string),
        });
    }

    let resolved = &inputs.resolved;
    let kind = resolved.kind();
    if kind.is_fileish() {
        let size = match kind {
            ContentKind::File => resolved.file.as_ref().and_then(|file| file.size),
            _ => None,
        };
        groups.push(SidebarGroup::Fileish {
            file_name: resolved.file_name().map(str::to_string),
            kind,
            size,
        });
    }

    if let Some(dims) = resolved.image {
        groups.push(SidebarGroup::Image {
            width: dims.width,
            height: dims.height,
            mime_type: resolved.file.as_ref().and_then(|file| file.mime_type.clone()),
        });
    }

    groups.push(SidebarGroup::Navigation {
        search_url: inputs.search_url.clone(),
        legacy_url: inputs.legacy_url.clone(),
    });

    groups
}

/// Format file size in human-readable format.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Localized size value: `N bytes`, plus a humanized form from 1 KiB on.
#[must_use]
pub fn size_label(i18n: &I18n, bytes: u64) -> String {
    let raw = bytes.to_string();
    if bytes >= 1024 {
        i18n.tr_with_args(
            "detail-size-bytes-human",
            &[("bytes", &raw), ("human", &format_file_size(bytes))],
        )
    } else {
        i18n.tr_with_args("detail-size-bytes", &[("bytes", &raw)])
    }
}

/// Title translation key of a group.
#[must_use]
pub fn group_title_key(group: &SidebarGroup) -> &'static str {
    match group {
        SidebarGroup::General { .. } => "detail-group-generalities",
        SidebarGroup::Fileish {
            kind: ContentKind::Directory,
            ..
        } => "detail-group-directory",
        SidebarGroup::Fileish { .. } => "detail-group-file",
        SidebarGroup::Image { .. } => "detail-group-image",
        SidebarGroup::Navigation { .. } => "detail-group-elsewhere",
    }
}

pub fn view<'a>(i18n: &I18n, groups: &[SidebarGroup], width: f32) -> Element<'a, Message> {
    let sections = groups.iter().fold(
        Column::new().spacing(spacing::LG).padding(spacing::MD),
        |column, group| {
            let title = i18n.tr(group_title_key(group));
            column.push(build_section(title, group_content(i18n, group)))
        },
    );

    container(scrollable(sections).height(Length::Fill))
        .width(Length::Fixed(width.max(0.0)))
        .height(Length::Fill)
        .into()
}

fn group_content<'a>(i18n: &I18n, group: &SidebarGroup) -> Element<'a, Message> {
    match group {
        SidebarGroup::General { title, description } => Column::new()
            .spacing(spacing::XS)
            .push(
                Text::new(
                    title
                        .clone()
                        .unwrap_or_else(|| i18n.tr("detail-no-title")),
                )
                .size(typography::TITLE_MD),
            )
            .push(
                Text::new(
                    description
                        .clone()
                        .unwrap_or_else(|| i18n.tr("detail-no-description")),
                )
                .size(typography::BODY),
            )
            .into(),
        SidebarGroup::Fileish {
            file_name, size, ..
        } => {
            let name = file_name
                .clone()
                .unwrap_or_else(|| i18n.tr("detail-no-filename"));
            let mut rows = Column::new()
                .spacing(spacing::XXS)
                .push(build_metadata_row(i18n.tr("detail-label-filename"), name));
            if let Some(bytes) = size {
                rows = rows.push(build_metadata_row(
                    i18n.tr("detail-label-size"),
                    size_label(i18n, *bytes),
                ));
            }
            rows.into()
        }
        SidebarGroup::Image {
            width,
            height,
            mime_type,
        } => {
            let mut rows = Column::new()
                .spacing(spacing::XXS)
                .push(build_metadata_row(
                    i18n.tr("detail-label-width"),
                    width.to_string(),
                ))
                .push(build_metadata_row(
                    i18n.tr("detail-label-height"),
                    height.to_string(),
                ));
            if let Some(mime) = mime_type {
                rows = rows.push(build_metadata_row(
                    i18n.tr("detail-label-mime-type"),
                    mime.clone(),
                ));
            }
            rows.into()
        }
        SidebarGroup::Navigation { .. } => Column::new()
            .spacing(spacing::XXS)
            .push(link(i18n.tr("detail-link-search"), Message::BackToSearch))
            .push(link(i18n.tr("detail-link-legacy"), Message::OpenLegacy))
            .into(),
    }
}

fn link<'a>(label: String, on_press: Message) -> Element<'a, Message> {
    button(Text::new(label).size(typography::BODY).color(palette::PRIMARY_500))
        .style(button::text)
        .padding(0)
        .on_press(on_press)
        .into()
}

fn build_metadata_row<'a>(label: String, value: String) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::SM)
        .push(
            Text::new(label)
                .size(typography::BODY)
                .width(Length::FillPortion(2)),
        )
        .push(
            Text::new(value)
                .size(typography::BODY)
                .width(Length::FillPortion(3)),
        )
        .into()
}

fn build_section<'a>(title: String, content: Element<'a, Message>) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XS)
        .push(Text::new(title).size(typography::BODY_LG))
        .push(rule::horizontal(1))
        .push(content)
        .into()
}
