// SPDX-License-Identifier: MPL-2.0
//! Widget tree of the image detail view.
//!
//! The main area stacks two layers, the image and the placeholder, each
//! positioned by padding so that it lands on its computed placement. The
//! sidebar sits to the right with its computed width.

use super::layout::Placement;
use super::sidebar;
use super::state::{ImageDetailView, Message};
use crate::i18n::I18n;
use crate::media::SpriteFrames;
use crate::ui::design_tokens::palette;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{container, image, Row, Space, Stack};
use iced::{Element, Length, Padding, Size};

/// Everything the view borrows from the host besides its own state.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub sprites: Option<&'a SpriteFrames>,
}

pub fn view<'a>(state: &'a ImageDetailView, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let (Some(inputs), Some(geometry)) = (state.inputs(), state.geometry()) else {
        return Space::new().width(Length::Fill).height(Length::Fill).into();
    };

    let mut layers = Stack::new()
        .width(Length::Fixed(geometry.main.width.max(0.0)))
        .height(Length::Fixed(geometry.main.height.max(0.0)));

    if let (Some(placement), Some(loaded)) = (geometry.image, state.loaded_image()) {
        if state.image_group().is_visible() {
            let img = image(loaded.handle.clone())
                .width(Length::Fixed(placement.width.max(0.0)))
                .height(Length::Fixed(placement.height.max(0.0)))
                .opacity(state.image_opacity());
            layers = layers.push(positioned(img.into(), placement));
        }
    }

    if state.placeholder_group().is_visible() {
        let walker = placeholder(state, &ctx, geometry.placeholder.size());
        layers = layers.push(positioned(walker, geometry.placeholder));
    }

    let groups = sidebar::compose(inputs);

    Row::new()
        .push(layers)
        .push(sidebar::view(ctx.i18n, &groups, geometry.sidebar_width))
        .into()
}

/// Sprite frame for the current step, facing the way the placeholder walks.
fn sprite_frame<'a>(
    state: &ImageDetailView,
    sprites: Option<&'a SpriteFrames>,
) -> Option<&'a image::Handle> {
    let animation = state.placeholder();
    sprites.and_then(|sprites| sprites.frame(animation.frame(), animation.is_mirrored()))
}

fn placeholder<'a>(
    state: &ImageDetailView,
    ctx: &ViewContext<'a>,
    size: Size,
) -> Element<'a, Message> {
    match sprite_frame(state, ctx.sprites) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(size.width))
            .height(Length::Fixed(size.height))
            .into(),
        None => {
            let side = size.width.min(size.height);
            AnimatedSpinner::new(
                palette::PRIMARY_500,
                state.placeholder().spinner_rotation(),
                Size::new(side, side),
            )
            .into_element()
        }
    }
}

/// Padding that moves content to `placement`.
///
/// Padding cannot be negative, so an element larger than the main area is
/// pinned to its top-left corner and overflows right and down instead of
/// spilling evenly on both sides.
fn offset_padding(placement: Placement) -> Padding {
    Padding {
        top: placement.top.max(0.0),
        right: 0.0,
        bottom: 0.0,
        left: placement.left.max(0.0),
    }
}

/// Places `content` at `placement` inside the main area.
fn positioned<'a>(content: Element<'a, Message>, placement: Placement) -> Element<'a, Message> {
    container(content)
        .padding(offset_padding(placement))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
