//! X11 backend.
//!
//! X11 has no notion of a non-client area the application can answer for,
//! so the chrome sits in front of the toolkit's event loop instead: the
//! [`X11Interceptor`] pulls events off the connection, drops the ones that
//! belong to the caption or a resize edge, and asks the window manager to
//! start the matching move or resize through the EWMH
//! `_NET_WM_MOVERESIZE` protocol.

use frameless_core::logging::targets;
use frameless_core::{
    ButtonAction, ChromeBackend, ChromeError, ChromeEvent, ChromeResult, Disposition,
    EventClassifier, NativeWindowHandle, Point, PointerButton, Rectangle, ResizeDirection, Size,
    WindowTree, WmRequest, WmRequestKind,
};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    AtomEnum, ButtonPressEvent, ClientMessageEvent, ConfigureNotifyEvent, ConnectionExt as _,
    EventMask, PropMode, Window,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;
use x11rb::CURRENT_TIME;

// Atoms used by the chrome.
x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        _NET_WM_MOVERESIZE,
        _GTK_SHOW_WINDOW_MENU,
        _MOTIF_WM_HINTS,
        _NET_SUPPORTED,
    }
}

/// `_NET_WM_MOVERESIZE` direction for a move.
const MOVERESIZE_MOVE: u32 = 8;

/// Source indication of a normal application.
const SOURCE_APPLICATION: u32 = 1;

/// `_MOTIF_WM_HINTS` with the decorations flag set and no decorations.
const MOTIF_NO_DECORATIONS: [u32; 5] = [2, 0, 0, 0, 0];

fn failed<E: std::fmt::Display>(call: &'static str) -> impl FnOnce(E) -> ChromeError {
    move |err| ChromeError::system_call(call, err)
}

fn xid(handle: NativeWindowHandle) -> ChromeResult<Window> {
    Window::try_from(handle.raw())
        .map_err(|_| ChromeError::UnsupportedHandle(format!("{handle} is not an X11 window id")))
}

/// Bounds carried by a configure notification.
///
/// `origin` is the window's position on the screen root. Without it the
/// event's own position is used, which is relative to the parent and so to
/// the window manager's frame once the window has been reparented.
fn configured_bounds(event: &ConfigureNotifyEvent, origin: Option<Point>) -> Rectangle {
    Rectangle::from_origin_size(
        origin.unwrap_or_else(|| Point::new(event.x.into(), event.y.into())),
        Size::new(event.width.into(), event.height.into()),
    )
}

/// `_NET_WM_MOVERESIZE` direction code of a resize.
pub fn moveresize_direction(direction: ResizeDirection) -> u32 {
    match direction {
        ResizeDirection::NorthWest => 0,
        ResizeDirection::North => 1,
        ResizeDirection::NorthEast => 2,
        ResizeDirection::East => 3,
        ResizeDirection::SouthEast => 4,
        ResizeDirection::South => 5,
        ResizeDirection::SouthWest => 6,
        ResizeDirection::West => 7,
    }
}

/// Payload of a `_NET_WM_MOVERESIZE` client message.
pub fn moveresize_data(direction: u32, screen: Point, button: PointerButton) -> [u32; 5] {
    [
        screen.x as u32,
        screen.y as u32,
        direction,
        u32::from(button.x11_number()),
        SOURCE_APPLICATION,
    ]
}

/// Payload of a `_GTK_SHOW_WINDOW_MENU` client message.
pub fn window_menu_data(screen: Point) -> [u32; 5] {
    [0, screen.x as u32, screen.y as u32, 0, 0]
}

/// Native operations over an X11 connection.
#[derive(Debug)]
pub struct X11Backend<C: Connection> {
    conn: C,
    screen_root: Window,
    atoms: Atoms,
}

impl X11Backend<RustConnection> {
    /// Open a new connection to the display named by `$DISPLAY`.
    pub fn connect() -> ChromeResult<Self> {
        let (conn, screen) = x11rb::connect(None).map_err(failed("connect"))?;
        Self::new(conn, screen)
    }
}

impl<C: Connection> X11Backend<C> {
    /// Wrap an existing connection, using screen number `screen`.
    pub fn new(conn: C, screen: usize) -> ChromeResult<Self> {
        let screen_root = conn
            .setup()
            .roots
            .get(screen)
            .map(|s| s.root)
            .ok_or_else(|| ChromeError::system_call("setup", format!("no screen {screen}")))?;
        let atoms = Atoms::new(&conn)
            .map_err(failed("InternAtom"))?
            .reply()
            .map_err(failed("InternAtom"))?;

        Ok(Self {
            conn,
            screen_root,
            atoms,
        })
    }

    /// The wrapped connection.
    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// The interned atoms.
    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    /// Ask the window manager to carry out `request`.
    ///
    /// The implicit pointer grab of the triggering press is released first,
    /// otherwise the window manager cannot take the pointer.
    pub fn send_request(&self, request: &WmRequest) -> ChromeResult<()> {
        let (type_, data) = match request.kind {
            WmRequestKind::Move => (
                self.atoms._NET_WM_MOVERESIZE,
                moveresize_data(MOVERESIZE_MOVE, request.screen, request.button),
            ),
            WmRequestKind::Resize(direction) => (
                self.atoms._NET_WM_MOVERESIZE,
                moveresize_data(moveresize_direction(direction), request.screen, request.button),
            ),
            WmRequestKind::SystemMenu => (
                self.atoms._GTK_SHOW_WINDOW_MENU,
                window_menu_data(request.screen),
            ),
        };

        if !matches!(request.kind, WmRequestKind::SystemMenu) {
            self.conn
                .ungrab_pointer(CURRENT_TIME)
                .map_err(failed("UngrabPointer"))?;
        }

        let message = ClientMessageEvent::new(32, xid(request.root)?, type_, data);
        self.conn
            .send_event(
                false,
                self.screen_root,
                EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
                message,
            )
            .map_err(failed("SendEvent"))?;
        self.conn.flush().map_err(failed("flush"))?;

        tracing::debug!(target: targets::X11, ?request, "sent window manager request");
        Ok(())
    }

    /// Translate a point on `window` into coordinates of `root`.
    fn translate(&self, window: Window, root: Window, point: Point) -> ChromeResult<Point> {
        let reply = self
            .conn
            .translate_coordinates(window, root, point.x as i16, point.y as i16)
            .map_err(failed("TranslateCoordinates"))?
            .reply()
            .map_err(failed("TranslateCoordinates"))?;
        Ok(Point::new(reply.dst_x.into(), reply.dst_y.into()))
    }
}

impl<C: Connection> WindowTree for X11Backend<C> {
    fn children(&self, window: NativeWindowHandle) -> ChromeResult<Vec<NativeWindowHandle>> {
        let tree = self
            .conn
            .query_tree(xid(window)?)
            .map_err(failed("QueryTree"))?
            .reply()
            .map_err(failed("QueryTree"))?;
        Ok(tree.children.into_iter().map(NativeWindowHandle::from).collect())
    }
}

impl<C: Connection> ChromeBackend for X11Backend<C> {
    fn window_bounds(&self, window: NativeWindowHandle) -> ChromeResult<Rectangle> {
        let window = xid(window)?;
        let geometry = self
            .conn
            .get_geometry(window)
            .map_err(failed("GetGeometry"))?
            .reply()
            .map_err(failed("GetGeometry"))?;
        let origin = self.translate(window, geometry.root, Point::ZERO)?;

        Ok(Rectangle::from_origin_size(
            origin,
            Size::new(geometry.width.into(), geometry.height.into()),
        ))
    }

    fn remove_decorations(&self, window: NativeWindowHandle) -> ChromeResult<()> {
        self.conn
            .change_property32(
                PropMode::REPLACE,
                xid(window)?,
                self.atoms._MOTIF_WM_HINTS,
                self.atoms._MOTIF_WM_HINTS,
                &MOTIF_NO_DECORATIONS,
            )
            .map_err(failed("ChangeProperty"))?;
        self.conn.flush().map_err(failed("flush"))?;
        Ok(())
    }

    fn is_supported(&self) -> bool {
        let supported = self
            .conn
            .get_property(
                false,
                self.screen_root,
                self.atoms._NET_SUPPORTED,
                AtomEnum::ATOM,
                0,
                u32::MAX,
            )
            .ok()
            .and_then(|cookie| cookie.reply().ok());

        supported
            .and_then(|reply| {
                reply
                    .value32()
                    .map(|mut atoms| atoms.any(|atom| atom == self.atoms._NET_WM_MOVERESIZE))
            })
            .unwrap_or(false)
    }
}

/// Replacement for the toolkit's "wait for the next event".
///
/// Events on the caption and resize edges never leave [`next_event`];
/// everything else is returned unchanged.
///
/// [`next_event`]: X11Interceptor::next_event
pub struct X11Interceptor<'a, C: Connection> {
    backend: &'a X11Backend<C>,
    classifier: EventClassifier,
}

impl<'a, C: Connection> X11Interceptor<'a, C> {
    /// Intercept events of `backend`'s connection using `classifier`.
    pub fn new(backend: &'a X11Backend<C>, classifier: EventClassifier) -> Self {
        Self {
            backend,
            classifier,
        }
    }

    /// Block until an event the toolkit should see arrives.
    pub fn next_event(&self) -> ChromeResult<Event> {
        loop {
            let event = self
                .backend
                .conn
                .wait_for_event()
                .map_err(failed("wait_for_event"))?;
            if self.accept(&event) {
                return Ok(event);
            }
        }
    }

    /// Return the next pending event the toolkit should see, if any.
    pub fn poll_event(&self) -> ChromeResult<Option<Event>> {
        while let Some(event) = self
            .backend
            .conn
            .poll_for_event()
            .map_err(failed("poll_for_event"))?
        {
            if self.accept(&event) {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn accept(&self, event: &Event) -> bool {
        match self.classifier.classify(&self.chrome_event(event)) {
            Disposition::Forward => true,
            Disposition::Suppress => false,
            Disposition::Request(request) => {
                // Requests are fire-and-forget; the event is consumed either way.
                if let Err(err) = self.backend.send_request(&request) {
                    tracing::warn!(target: targets::X11, error = %err, "window manager request failed");
                }
                false
            }
        }
    }

    fn chrome_event(&self, event: &Event) -> ChromeEvent {
        match event {
            Event::ButtonPress(button) => self.button_event(button, ButtonAction::Press),
            Event::ButtonRelease(button) => self.button_event(button, ButtonAction::Release),
            Event::ConfigureNotify(configure) => ChromeEvent::Configure {
                window: configure.window.into(),
                bounds: configured_bounds(configure, self.screen_origin(configure)),
            },
            Event::DestroyNotify(destroy) => ChromeEvent::Destroy {
                window: destroy.window.into(),
            },
            _ => ChromeEvent::Other,
        }
    }

    /// Screen position of a managed root, matching what
    /// [`ChromeBackend::window_bounds`] stored.
    fn screen_origin(&self, event: &ConfigureNotifyEvent) -> Option<Point> {
        let window = NativeWindowHandle::from(event.window);
        let context = self.classifier.registry().lookup(window)?;
        if !context.is_root(window) {
            return None;
        }

        match self
            .backend
            .translate(event.window, self.backend.screen_root, Point::ZERO)
        {
            Ok(origin) => Some(origin),
            Err(err) => {
                tracing::warn!(target: targets::X11, %window, error = %err, "coordinate translation failed");
                None
            }
        }
    }

    fn button_event(&self, event: &ButtonPressEvent, action: ButtonAction) -> ChromeEvent {
        let window = NativeWindowHandle::from(event.event);
        let mut local = Point::new(event.event_x.into(), event.event_y.into());

        if let Some(context) = self.classifier.registry().lookup(window)
            && !context.is_root(window)
        {
            let translated = xid(context.root())
                .and_then(|root| self.backend.translate(event.event, root, local));
            match translated {
                Ok(point) => local = point,
                Err(err) => {
                    tracing::warn!(target: targets::X11, %window, error = %err, "coordinate translation failed");
                }
            }
        }

        ChromeEvent::Button {
            window,
            button: PointerButton::from_x11(event.detail),
            action,
            local,
            screen: Point::new(event.root_x.into(), event.root_y.into()),
        }
    }
}
