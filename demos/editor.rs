//! Editor Example - A text input in the terminal
//!
//! This example demonstrates everything working together:
//! - Column layout with centered children
//! - A padded box around a text input
//! - Text bound to the input's value signal
//! - Held-key repeat (on terminals that report key releases)
//!
//! Press Ctrl+C to quit. Logs go to stderr, filtered by `RUST_LOG`.
//!
//! Run with: cargo run --example editor 2>editor.log

use std::rc::Rc;

use ember_ui::{
    mount, Alignment, BoxNode, BoxProps, ClockValues, Container, ContainerProps, EditorConfig,
    InputProps, PropValue, Rgba, TerminalCellFont, Text, TextInput, TextProps, UiBuilder,
};
use ember_ui::pipeline::terminal_viewport;
use tracing_subscriber::EnvFilter;

fn main() -> ember_ui::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let viewport = terminal_viewport()?;
    let mut ui = UiBuilder::new()
        .with_viewport(viewport.width, viewport.height)
        .with_font("cell", TerminalCellFont)
        .build();

    let input = TextInput::new(
        ui.bus(),
        ui.fonts(),
        InputProps {
            font: "cell".into(),
            max_width: 40.0,
            background: Rgba::rgb(40, 44, 52),
            initial_value: "type here".into(),
            // One cell wide.
            editor: EditorConfig {
                caret_width: 1.0,
                ..Default::default()
            },
            ..Default::default()
        },
    )?;
    let value = input.value();

    let title = Text::new(TextProps {
        content: "ember-ui editor".into(),
        font: "cell".into(),
        color: Rgba::rgb(97, 175, 239),
        ..Default::default()
    });

    let framed = BoxNode::new(BoxProps {
        child: Some(input.into()),
        padding: ClockValues::symmetric(1.0, 2.0),
        background: Rgba::DARK_GRAY,
        ..Default::default()
    })?;

    let echo = Text::new(TextProps {
        content: PropValue::Signal(value.clone()),
        font: "cell".into(),
        color: Rgba::GRAY,
        ..Default::default()
    });

    let count = Text::new(TextProps {
        content: PropValue::Getter(Rc::new(move || {
            format!("{} characters", value.get().chars().count())
        })),
        font: "cell".into(),
        color: Rgba::GRAY,
        ..Default::default()
    });

    ui.mount(Container::new(ContainerProps {
        main_axis: Alignment::Center,
        cross_axis: Alignment::Center,
        children: vec![title.into(), framed.into(), echo.into(), count.into()],
        ..Default::default()
    }));

    tracing::info!("starting editor demo");
    let mut handle = mount()?;
    handle.run(&mut ui)
}
