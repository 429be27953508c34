use std::cell::RefCell;
use std::rc::Rc;

use kiosk_carousel::carousel::CarouselEvent;
use kiosk_carousel::input::Event;
use kiosk_carousel::layout::StripConfig;
use kiosk_carousel::Launcher;

#[test]
fn launcher_processes_queued_keys_then_exits_on_close() {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let launcher = Launcher::new()
        .strip(StripConfig::new(1000.0, 400.0).item_size(100.0, 150.0).gap(125.0))
        .on_event(move |event| sink.borrow_mut().push(event));
    assert_eq!(launcher.app_list().len(), 5);

    let sender = launcher.sender();
    sender.send(Event::char('j')).unwrap();
    sender.send(Event::char('d')).unwrap();
    drop(sender);

    launcher.run().unwrap();

    assert!(events
        .borrow()
        .contains(&CarouselEvent::PressModeChanged(true)));
}
