use crate::db::posts::{MetaRow, PostRow};
use crate::templates::{button, card, desktop_layout};
use chrono::NaiveDateTime;
use maud::{html, Markup};

/// One line in a record's history: a note rendered as its summary, or a plain comment.
pub struct EntryVm {
    pub author: String,
    pub created_at: NaiveDateTime,
    pub text: String,
    pub is_note: bool,
}

pub struct RecordVm {
    pub post: PostRow,
    pub meta: Vec<MetaRow>,
    pub entries: Vec<EntryVm>,
}

pub fn record_page(vm: &RecordVm) -> Markup {
    let base = format!("/admin/{}/{}", vm.post.post_type, vm.post.id);

    desktop_layout(
        &format!("{} #{}", vm.post.post_type, vm.post.id),
        html! {
            main class="container" {
                h1 { (vm.post.title) " " small { "(" (vm.post.post_type) " #" (vm.post.id) ")" } }

                (card("Details", html! {
                    @if vm.meta.is_empty() {
                        p { "No details recorded." }
                    } @else {
                        table style="border-collapse: collapse;" {
                            tbody {
                                @for m in &vm.meta {
                                    tr {
                                        th style="padding: 4px 12px 4px 0; text-align: left;" { code { (m.key) } }
                                        td style="padding: 4px 0;" { (m.value) }
                                    }
                                }
                            }
                        }
                    }
                    form action=(format!("{base}/meta")) method="post" style="display: flex; gap: 8px; align-items: center; margin-top: 1rem;" {
                        input type="text" name="key" placeholder="_price" required;
                        input type="text" name="value" placeholder="value";
                        (button("Save"))
                    }
                }))

                (card("Notes", html! {
                    @if vm.entries.is_empty() {
                        p { "Nothing logged yet." }
                    } @else {
                        ul class="notes" {
                            @for e in &vm.entries {
                                li class=(if e.is_note { "note" } else { "comment" }) {
                                    strong { (e.text) }
                                    " "
                                    small { (e.author) ", " (e.created_at.format("%Y-%m-%d %H:%M")) }
                                }
                            }
                        }
                    }
                }))
            }
        },
    )
}
