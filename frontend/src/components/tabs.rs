use yew::prelude::*;

/// Tab strip. The parent owns the selected value and hands it, together with
/// the change callback, to every trigger.
#[derive(Properties, PartialEq)]
pub struct TabsProps {
    pub children: Children,
}

#[function_component(Tabs)]
pub fn tabs(props: &TabsProps) -> Html {
    html! {
        <div class="tabs" role="tablist">
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TabTriggerProps {
    pub value: AttrValue,
    pub selected: AttrValue,
    pub on_select: Callback<AttrValue>,
    pub children: Children,
}

#[function_component(TabTrigger)]
pub fn tab_trigger(props: &TabTriggerProps) -> Html {
    let is_selected = props.value == props.selected;
    let onclick = {
        let value = props.value.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(value.clone()))
    };

    html! {
        <button
            type="button"
            role="tab"
            class={classes!("tab-trigger", is_selected.then_some("active"))}
            aria-selected={is_selected.to_string()}
            {onclick}
        >
            { for props.children.iter() }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct TabPanelProps {
    pub value: AttrValue,
    pub selected: AttrValue,
    pub children: Children,
}

#[function_component(TabPanel)]
pub fn tab_panel(props: &TabPanelProps) -> Html {
    if props.value != props.selected {
        return html! {};
    }
    html! {
        <div class="tab-panel" role="tabpanel">
            { for props.children.iter() }
        </div>
    }
}
