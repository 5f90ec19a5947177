use crate::db::comments::CommentRow;
use crate::domain::stats::CommentStats;
use crate::templates::{button, card, desktop_layout};
use maud::{html, Markup};

pub struct CommentsVm {
    pub stats: CommentStats,
    pub comments: Vec<CommentRow>,
}

fn approval_label(approved: &str) -> &str {
    match approved {
        "0" => "Pending",
        "1" => "Approved",
        other => other,
    }
}

pub fn comments_page(vm: &CommentsVm) -> Markup {
    desktop_layout(
        "Comments",
        html! {
            main class="container" {
                h1 { "Comments" }

                (card("Totals", html! {
                    ul class="stats" {
                        li { "All: " strong { (vm.stats.all) } }
                        li { "Pending: " strong { (vm.stats.moderated) } }
                        li { "Approved: " strong { (vm.stats.approved) } }
                        li { "Spam: " strong { (vm.stats.spam) } }
                        li { "Trash: " strong { (vm.stats.trash) } }
                    }
                }))

                @if vm.comments.is_empty() {
                    p { "No comments yet." }
                } @else {
                    table style="width: 100%; border-collapse: collapse;" {
                        thead {
                            tr {
                                th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Author" }
                                th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Comment" }
                                th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Record" }
                                th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Date" }
                                th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Status" }
                            }
                        }
                        tbody {
                            @for c in &vm.comments {
                                tr {
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (c.author) }
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (c.content) }
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { "#" (c.post_id) }
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (c.created_at.format("%Y-%m-%d %H:%M")) }
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" {
                                        form action=(format!("/admin/comments/{}/status", c.id)) method="post" style="display: flex; gap: 8px; margin: 0;" {
                                            select name="status" {
                                                @for (value, label) in [("0", "Pending"), ("1", "Approved"), ("spam", "Spam"), ("trash", "Trash")] {
                                                    option value=(value) selected[c.approved == value] { (label) }
                                                }
                                            }
                                            (button("Set"))
                                        }
                                        small { (approval_label(&c.approved)) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
