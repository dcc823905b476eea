use shared::UserProfile;
use yew::prelude::*;

use super::avatar::Avatar;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub members: Vec<UserProfile>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Our Journey"}</h1>
                <div class="header-right family-avatars">
                    { for props.members.iter().map(|member| html! {
                        <Avatar user={member.clone()} size={32} />
                    }) }
                </div>
            </div>
        </header>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn member(id: &str, name: &str) -> UserProfile {
        UserProfile {
            id: Some(id.to_string()),
            display_name: Some(name.to_string()),
            ..UserProfile::default()
        }
    }

    #[wasm_bindgen_test]
    async fn test_header_renders_title_and_member_avatars() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        let props = HeaderProps {
            members: vec![member("u1", "Jo Park"), member("u2", "Sam")],
        };
        yew::Renderer::<Header>::with_root_and_props(root.clone(), props).render();
        TimeoutFuture::new(10).await;

        let title = root.query_selector("h1").unwrap().unwrap();
        assert_eq!(title.text_content().as_deref(), Some("Our Journey"));
        assert_eq!(root.query_selector_all(".avatar").unwrap().length(), 2);
    }
}
