use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::{h_flex, v_flex};
use gpui_sortable::{
    SortableConfig, SortableItem, SortableLayout, SortableListState, SortableRowState,
    sortable_list,
};
use tracing::info;

use crate::fruits::{Fruit, catalog};

pub struct FruitListExample {
    list: Entity<SortableListState<Fruit>>,
}

impl FruitListExample {
    pub fn view(config: SortableConfig, _window: &mut Window, cx: &mut App) -> Entity<Self> {
        let list = cx.new(|cx| {
            SortableListState::new(cx)
                .items(fruit_items())
                .config(config)
                .layout(SortableLayout::Wrap)
                .gap(px(8.))
                .item_margin(px(4.))
                .on_sort(|event, items| {
                    let moved = items.get(event.new_index).map(|item| item.id.clone());
                    info!(
                        from = event.current_index,
                        to = event.new_index,
                        ?moved,
                        "fruit reordered"
                    );
                })
        });
        cx.new(|cx| {
            cx.observe(&list, |_, _, cx| cx.notify()).detach();
            Self { list }
        })
    }
}

impl Render for FruitListExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let dump = order_dump(self.list.read(cx).items_ref());

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Fruits"),
                    )
                    .child(div().text_sm().text_color(theme.muted_foreground).child(
                        "Drag a card to reorder. Touch input starts after a short hold.",
                    )),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(
                        div()
                            .w(px(480.))
                            .h_full()
                            .p(px(8.))
                            .rounded(px(12.))
                            .border_1()
                            .border_color(theme.border)
                            .bg(theme.background)
                            .child(sortable_list(&self.list, |ix, item, row_state, _window, cx| {
                                render_fruit_card(ix, item, row_state, cx)
                            })),
                    )
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("Debug (current order)"),
                            )
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .p(px(12.))
                                    .child(render_dump(dump)),
                            ),
                    ),
            )
    }
}

fn render_fruit_card(
    _ix: usize,
    item: &SortableItem<Fruit>,
    row_state: SortableRowState,
    cx: &mut App,
) -> AnyElement {
    let theme = cx.theme();

    h_flex()
        .w(px(140.))
        .h(px(48.))
        .px(px(10.))
        .gap_x_2()
        .items_center()
        .rounded(px(8.))
        .border_1()
        .border_color(theme.border)
        .bg(theme.secondary)
        .when(row_state.ghost, |this| this.border_color(theme.ring))
        .when(item.is_disabled(), |this| this.opacity(0.5))
        .child(div().size(px(14.)).rounded_full().bg(rgb(item.data.color)))
        .child(item.label.clone())
        .into_any_element()
}

fn render_dump(text: String) -> impl IntoElement {
    let lines = text
        .lines()
        .map(|line| div().text_sm().child(line.to_string()));
    v_flex().gap_y_0p5().children(lines)
}

fn order_dump(items: &[SortableItem<Fruit>]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(ix, item)| {
            let fruit = serde_json::to_string(&item.data).unwrap_or_default();
            format!("{ix:02}  {fruit}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn fruit_items() -> Vec<SortableItem<Fruit>> {
    catalog()
        .into_iter()
        .map(|fruit| {
            SortableItem::new(fruit.id, fruit.name, fruit.clone()).disabled(!fruit.in_season)
        })
        .collect()
}
