use maud::{html, Markup};

/// Titled panel used on every admin screen.
pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" style="margin-bottom: 2rem;" {
            h3 { (title) }
            (body)
        }
    }
}
