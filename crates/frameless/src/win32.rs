//! Win32 backend.
//!
//! Every native window of a managed window has its window procedure replaced
//! by [`chrome_procedure`]. The replaced procedure is kept in per-window
//! state attached as a window property, together with the registry the
//! procedure consults, and every message the chrome does not answer is
//! passed on to it. Answering `WM_NCHITTEST` is all it takes for Windows to
//! run moves, resizes and snapping natively.

use std::ffi::c_void;
use std::sync::Arc;

use frameless_core::logging::targets;
use frameless_core::{
    dispatch, ChromeBackend, ChromeConfig, ChromeError, ChromeResult, HitZone,
    NativeWindowHandle, Point, Rectangle, ResizeDirection, SubclassAction, SubclassMessage,
    WindowContext, WindowRegistry, WindowTree,
};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{BOOL, HANDLE, HWND, LPARAM, LRESULT, RECT, TRUE, WPARAM};
use windows::Win32::Graphics::Dwm::DwmExtendFrameIntoClientArea;
use windows::Win32::UI::Controls::MARGINS;
use windows::Win32::UI::HiDpi::{GetDpiForWindow, GetSystemMetricsForDpi};
use windows::Win32::UI::WindowsAndMessaging::{
    CallWindowProcW, DefWindowProcW, EnumChildWindows, GetPropW, GetSystemMenu, GetWindowLongPtrW,
    GetWindowRect, IsZoomed, RemovePropW, SendMessageW, SetPropW, SetWindowLongPtrW,
    SetWindowPos, TrackPopupMenu, GWLP_WNDPROC, GWL_STYLE, HTBOTTOM, HTBOTTOMLEFT, HTBOTTOMRIGHT,
    HTCAPTION, HTCLIENT, HTLEFT, HTRIGHT, HTTOP, HTTOPLEFT, HTTOPRIGHT,
    NCCALCSIZE_PARAMS, SM_CXPADDEDBORDER, SWP_FRAMECHANGED, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
    TPM_LEFTALIGN, TPM_RIGHTBUTTON, WM_COMMAND, WM_CREATE, WM_DESTROY, WM_MOVE, WM_NCCALCSIZE,
    WM_NCDESTROY, WM_NCHITTEST, WM_NCRBUTTONDOWN, WM_NCRBUTTONUP, WM_PARENTNOTIFY, WM_SIZE,
    WM_SYSCOMMAND, WNDPROC, WS_THICKFRAME,
};

/// Window property holding the per-window [`Subclass`] state.
const SUBCLASS_PROP: PCWSTR = w!("frameless.subclass");

/// Mask of system-menu command identifiers.
const SYSTEM_COMMAND_MASK: usize = 0xF000;

/// Hit-test answer passing the message on to the window underneath.
const HT_TRANSPARENT: isize = -1;

fn hwnd(handle: NativeWindowHandle) -> HWND {
    HWND(handle.raw() as usize as *mut c_void)
}

fn handle_of(hwnd: HWND) -> NativeWindowHandle {
    NativeWindowHandle::from_raw(hwnd.0 as usize as u64)
}

fn low_word(value: usize) -> u32 {
    (value & 0xFFFF) as u32
}

/// Signed screen point packed into an `LPARAM`.
fn point_from_lparam(lparam: LPARAM) -> Point {
    Point::new(
        i32::from(lparam.0 as u16 as i16),
        i32::from((lparam.0 >> 16) as u16 as i16),
    )
}

/// Hit-test code answering `WM_NCHITTEST` for a zone.
pub fn hit_code(zone: HitZone) -> isize {
    match zone {
        HitZone::Client | HitZone::Control(_) => HTCLIENT as isize,
        HitZone::Caption => HTCAPTION as isize,
        HitZone::Resize(direction) => match direction {
            ResizeDirection::NorthWest => HTTOPLEFT as isize,
            ResizeDirection::North => HTTOP as isize,
            ResizeDirection::NorthEast => HTTOPRIGHT as isize,
            ResizeDirection::East => HTRIGHT as isize,
            ResizeDirection::SouthEast => HTBOTTOMRIGHT as isize,
            ResizeDirection::South => HTBOTTOM as isize,
            ResizeDirection::SouthWest => HTBOTTOMLEFT as isize,
            ResizeDirection::West => HTLEFT as isize,
        },
    }
}

/// Reduce a native message to what the chrome inspects.
pub fn decode_message(msg: u32, wparam: WPARAM, lparam: LPARAM) -> SubclassMessage {
    let on_caption = wparam.0 == HTCAPTION as usize;

    match msg {
        WM_NCHITTEST => SubclassMessage::HitTest {
            screen: point_from_lparam(lparam),
        },
        WM_NCCALCSIZE => SubclassMessage::NonClientCalcSize {
            recalculate: wparam.0 != 0,
        },
        WM_SIZE | WM_MOVE => SubclassMessage::SizeOrMove,
        WM_NCRBUTTONDOWN => SubclassMessage::NonClientRightDown {
            caption: on_caption,
        },
        WM_NCRBUTTONUP => SubclassMessage::NonClientRightUp {
            caption: on_caption,
            screen: point_from_lparam(lparam),
        },
        WM_COMMAND => SubclassMessage::Command {
            system: wparam.0 & SYSTEM_COMMAND_MASK != 0,
        },
        WM_SYSCOMMAND => SubclassMessage::SystemCommand,
        WM_DESTROY => SubclassMessage::Destroy,
        WM_NCDESTROY => SubclassMessage::NonClientDestroy,
        WM_PARENTNOTIFY if low_word(wparam.0) == WM_CREATE => SubclassMessage::ChildCreated {
            child: handle_of(HWND(lparam.0 as *mut c_void)),
        },
        _ => SubclassMessage::Other,
    }
}

/// Extra top padding of a maximized window's caption, in pixels.
fn caption_padding(hwnd: HWND) -> i32 {
    unsafe { GetSystemMetricsForDpi(SM_CXPADDEDBORDER, GetDpiForWindow(hwnd)) }
}

fn is_maximized(hwnd: HWND) -> bool {
    unsafe { IsZoomed(hwnd).as_bool() }
}

/// The window's rectangle as the chrome sees it.
fn chrome_bounds(hwnd: HWND) -> ChromeResult<Rectangle> {
    let mut rect = RECT::default();
    unsafe {
        GetWindowRect(hwnd, &mut rect)
            .map_err(|e| ChromeError::system_call("GetWindowRect", e))?;
    }
    if is_maximized(hwnd) {
        rect.top += caption_padding(hwnd);
    }
    Ok(Rectangle::new(rect.left, rect.top, rect.right, rect.bottom))
}

/// Per-window state of a subclassed window.
struct Subclass {
    previous: WNDPROC,
    registry: Arc<WindowRegistry>,
    config: ChromeConfig,
}

impl Subclass {
    fn forward(&self, hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
        unsafe {
            match self.previous {
                Some(_) => CallWindowProcW(self.previous, hwnd, msg, wparam, lparam),
                None => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }
    }

    fn handle(
        &self,
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
        message: SubclassMessage,
    ) -> LRESULT {
        let window = handle_of(hwnd);
        let Some(context) = self.registry.lookup(window) else {
            return self.forward(hwnd, msg, wparam, lparam);
        };

        match dispatch(&context, window, message, &self.config) {
            SubclassAction::Zone(zone) => LRESULT(hit_code(zone)),
            SubclassAction::Transparent => LRESULT(HT_TRANSPARENT),
            SubclassAction::PadCaption => {
                // With a zero return the proposed client rect becomes the
                // whole window; a maximized window overhangs the screen.
                if is_maximized(hwnd) {
                    let params = unsafe { &mut *(lparam.0 as *mut NCCALCSIZE_PARAMS) };
                    params.rgrc[0].top += caption_padding(hwnd);
                }
                LRESULT(0)
            }
            SubclassAction::RefreshBounds => {
                match chrome_bounds(hwnd) {
                    Ok(bounds) => context.set_bounds(bounds),
                    Err(err) => {
                        tracing::warn!(target: targets::WIN32, %window, error = %err, "failed to refresh bounds");
                    }
                }
                self.forward(hwnd, msg, wparam, lparam)
            }
            SubclassAction::Handled => LRESULT(0),
            SubclassAction::ShowSystemMenu { root, screen } => {
                let root = self::hwnd(root);
                unsafe {
                    let menu = GetSystemMenu(root, BOOL::from(false));
                    let _ = TrackPopupMenu(
                        menu,
                        TPM_LEFTALIGN | TPM_RIGHTBUTTON,
                        screen.x,
                        screen.y,
                        0,
                        root,
                        None,
                    );
                }
                LRESULT(0)
            }
            SubclassAction::RedirectSystemCommand { root } => unsafe {
                SendMessageW(self::hwnd(root), WM_SYSCOMMAND, wparam, lparam)
            },
            SubclassAction::DefaultOnRoot { root } => unsafe {
                DefWindowProcW(self::hwnd(root), msg, wparam, lparam)
            },
            SubclassAction::Unregister => {
                self.registry.remove(window);
                self.forward(hwnd, msg, wparam, lparam)
            }
            SubclassAction::SubclassChild { child } => {
                if self.registry.register(child, &context)
                    && let Err(err) =
                        unsafe { subclass(self::hwnd(child), &self.registry, &self.config) }
                {
                    tracing::warn!(target: targets::WIN32, %child, error = %err, "failed to subclass child window");
                }
                self.forward(hwnd, msg, wparam, lparam)
            }
            // Detaching is handled by the procedure itself.
            SubclassAction::Detach | SubclassAction::Forward => {
                self.forward(hwnd, msg, wparam, lparam)
            }
        }
    }
}

/// The window procedure installed on every managed window.
///
/// # Safety
///
/// Only called by the system for windows subclassed by this module.
pub unsafe extern "system" fn chrome_procedure(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        let state = GetPropW(hwnd, SUBCLASS_PROP).0 as *mut Subclass;
        if state.is_null() {
            return DefWindowProcW(hwnd, msg, wparam, lparam);
        }

        let message = decode_message(msg, wparam, lparam);
        if message == SubclassMessage::NonClientDestroy {
            let result = (*state).forward(hwnd, msg, wparam, lparam);
            detach(hwnd, state);
            return result;
        }

        (*state).handle(hwnd, msg, wparam, lparam, message)
    }
}

/// Install the chrome procedure on `hwnd`. Already subclassed windows are
/// left alone.
///
/// # Safety
///
/// `hwnd` must be a window owned by the calling thread.
unsafe fn subclass(
    hwnd: HWND,
    registry: &Arc<WindowRegistry>,
    config: &ChromeConfig,
) -> ChromeResult<()> {
    unsafe {
        if !GetPropW(hwnd, SUBCLASS_PROP).0.is_null() {
            return Ok(());
        }

        let state = Box::into_raw(Box::new(Subclass {
            previous: None,
            registry: Arc::clone(registry),
            config: config.clone(),
        }));
        if let Err(err) = SetPropW(hwnd, SUBCLASS_PROP, HANDLE(state.cast())) {
            drop(Box::from_raw(state));
            return Err(ChromeError::system_call("SetPropW", err));
        }

        let previous = SetWindowLongPtrW(hwnd, GWLP_WNDPROC, chrome_procedure as usize as isize);
        (*state).previous = std::mem::transmute::<isize, WNDPROC>(previous);
    }

    tracing::debug!(target: targets::WIN32, window = %handle_of(hwnd), "subclassed window");
    Ok(())
}

/// Restore the previous procedure and free the per-window state.
///
/// # Safety
///
/// `state` must be the pointer stored on `hwnd` by [`subclass`]; it is
/// invalid afterwards.
unsafe fn detach(hwnd: HWND, state: *mut Subclass) {
    let state = unsafe { Box::from_raw(state) };
    let previous = state.previous.map_or(0, |procedure| procedure as usize as isize);
    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_WNDPROC, previous);
        let _ = RemovePropW(hwnd, SUBCLASS_PROP);
    }
    tracing::debug!(target: targets::WIN32, window = %handle_of(hwnd), "detached window");
}

unsafe extern "system" fn collect_child(child: HWND, lparam: LPARAM) -> BOOL {
    let children = unsafe { &mut *(lparam.0 as *mut Vec<NativeWindowHandle>) };
    children.push(handle_of(child));
    TRUE
}

/// Native operations over Win32 windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Backend;

impl Win32Backend {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

impl WindowTree for Win32Backend {
    fn children(&self, window: NativeWindowHandle) -> ChromeResult<Vec<NativeWindowHandle>> {
        let mut children: Vec<NativeWindowHandle> = Vec::new();
        unsafe {
            // Returns FALSE both on failure and when there are no children.
            let _ = EnumChildWindows(
                hwnd(window),
                Some(collect_child),
                LPARAM(&mut children as *mut Vec<NativeWindowHandle> as isize),
            );
        }
        Ok(children)
    }
}

impl ChromeBackend for Win32Backend {
    fn window_bounds(&self, window: NativeWindowHandle) -> ChromeResult<Rectangle> {
        chrome_bounds(hwnd(window))
    }

    fn remove_decorations(&self, window: NativeWindowHandle) -> ChromeResult<()> {
        let hwnd = hwnd(window);
        unsafe {
            let style = GetWindowLongPtrW(hwnd, GWL_STYLE);
            SetWindowLongPtrW(hwnd, GWL_STYLE, style | WS_THICKFRAME.0 as isize);

            // Keeps the DWM shadow once the frame is gone.
            let margins = MARGINS {
                cxLeftWidth: 0,
                cxRightWidth: 0,
                cyTopHeight: 1,
                cyBottomHeight: 0,
            };
            DwmExtendFrameIntoClientArea(hwnd, &margins)
                .map_err(|e| ChromeError::system_call("DwmExtendFrameIntoClientArea", e))?;
        }
        Ok(())
    }

    fn attach(
        &self,
        window: NativeWindowHandle,
        context: &Arc<WindowContext>,
        registry: &Arc<WindowRegistry>,
        config: &ChromeConfig,
    ) -> ChromeResult<()> {
        let hwnd = hwnd(window);
        unsafe {
            subclass(hwnd, registry, config)?;

            if context.is_root(window) {
                // Recalculate the frame through the chrome procedure.
                SetWindowPos(
                    hwnd,
                    HWND::default(),
                    0,
                    0,
                    0,
                    0,
                    SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER,
                )
                .map_err(|e| ChromeError::system_call("SetWindowPos", e))?;
            }
        }
        Ok(())
    }
}
