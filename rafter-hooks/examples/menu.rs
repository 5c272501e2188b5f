use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as CtEvent, KeyCode};
use crossterm::{cursor, execute, queue, terminal};
use rafter_hooks::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use tuidom::{Document, Element, Event, EventKind, Key, LayoutResult, Rect};

const ITEMS: [(&str, &str); 3] = [("new", "New file"), ("open", "Open..."), ("save", "Save")];

fn tree() -> Element {
    Element::box_()
        .id("root")
        .scrollable(true)
        .child(Element::item("[ File ]").id("btn"))
        .child(
            Element::box_()
                .id("menu")
                .children(ITEMS.iter().map(|(id, label)| Element::item(*label).id(*id))),
        )
        .child(Element::item("[ Quit ]").id("quit"))
}

fn layout() -> LayoutResult {
    let mut layout = LayoutResult::new();
    layout.insert("root".into(), Rect::new(0, 0, 80, 24));
    layout.insert("btn".into(), Rect::new(0, 0, 10, 1));
    layout.insert("menu".into(), Rect::new(0, 1, 16, ITEMS.len() as u16));
    for (row, (id, _)) in ITEMS.iter().enumerate() {
        layout.insert((*id).into(), Rect::new(0, 1 + row as u16, 16, 1));
    }
    layout.insert("quit".into(), Rect::new(20, 0, 10, 1));
    layout
}

fn draw(out: &mut impl Write, doc: &Document, open: bool, chosen: Option<&str>) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    write!(out, "[ File ]            [ Quit ]")?;
    if open {
        let focused = doc.focused();
        for (row, (id, label)) in ITEMS.iter().enumerate() {
            let marker = if focused.as_deref() == Some(*id) { '>' } else { ' ' };
            queue!(out, cursor::MoveTo(0, 1 + row as u16))?;
            write!(out, "{marker} {label:<14}")?;
        }
    }
    queue!(out, cursor::MoveTo(0, 6))?;
    write!(out, "Chosen: {}", chosen.unwrap_or("-"))?;
    queue!(out, cursor::MoveTo(0, 7))?;
    write!(out, "Click or press Enter on [ File ]. Arrows move, Esc closes, q quits.")?;
    out.flush()
}

fn main() -> io::Result<()> {
    let log_file = File::create("menu.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let doc = Document::new(tree());
    let layout = layout();
    let chosen: Ref<Option<String>> = Ref::new(None);

    let render_doc = doc.clone();
    let chosen_sink = chosen.clone();
    let mut app = Instance::with_config(
        InstanceConfig::new("MenuDemo"),
        move |hooks: &mut Hooks<'_>, _: &()| {
            let toggle = hooks.use_toggle(false);
            let chosen = chosen_sink.clone();
            let options = MenuOptions::new(toggle.disable.clone())
                .visible(toggle.value)
                .control_id("btn")
                .on_click(move |event| chosen.set(event.target().map(str::to_string)));
            let handlers = hooks.use_menu(&render_doc, options);
            (toggle, handlers)
        },
    );

    let (toggle, handlers) = app.render(&()).expect("first render");
    handlers.attach(&doc, "menu");
    {
        let toggle = toggle.toggle.clone();
        doc.bind("btn", EventKind::Click, move |_| toggle.emit());
    }
    {
        let toggle = toggle.toggle.clone();
        doc.bind("btn", EventKind::Key, move |event| {
            if matches!(event.event().key(), Some((Key::Enter, _))) {
                toggle.emit();
            }
        });
    }
    doc.focus("btn");

    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, terminal::EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let mut open = false;
    let result = (|| -> io::Result<()> {
        loop {
            if let Some((toggle, _)) = app.render_if_dirty(&()).expect("render") {
                if toggle.value && !open {
                    doc.focus(ITEMS[0].0);
                }
                open = toggle.value;
            }
            draw(&mut out, &doc, open, chosen.get().as_deref())?;

            let raw = event::read()?;
            if let CtEvent::Key(key) = &raw {
                if key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
            for event in doc.process_crossterm(std::slice::from_ref(&raw), &layout) {
                // Quit is a plain button outside the menu
                let quit = matches!(&event, Event::Click { target: Some(t), .. } if t == "quit");
                doc.dispatch(event);
                if quit {
                    return Ok(());
                }
            }
        }
    })();

    execute!(out, cursor::Show, DisableMouseCapture, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}
