use hooklab_core::{Cx, View};
use hooklab_ui::{Button, Column, Text};

/// Three updaters in one handler: the count moves by three, in one render.
pub fn PlusThreePage(cx: &mut Cx<'_>) -> View {
    let count = cx.use_state(|| 0i64);

    Column(vec![
        Text(count.get().to_string()).key("count"),
        Button("+3", {
            let count = count.clone();
            move || {
                count.update(|c| c + 1);
                count.update(|c| c + 1);
                count.update(|c| c + 1);
            }
        }),
    ])
}

#[cfg(test)]
mod tests {
    use hooklab_core::Runtime;

    use super::*;

    #[test]
    fn test_plus_three_in_one_render() {
        let mut rt = Runtime::new();
        let page = rt.mount("plus-three", PlusThreePage).unwrap();
        rt.click(page, "+3").unwrap();
        assert_eq!(rt.view(page).unwrap().text_of("count"), Some("3"));
        assert_eq!(rt.render_count(page), Some(2));
        rt.click(page, "+3").unwrap();
        assert_eq!(rt.view(page).unwrap().text_of("count"), Some("6"));
    }
}
